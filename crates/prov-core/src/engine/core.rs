//! Sesión de procedencia y hooks del ciclo de vida.
//!
//! `Provenance` es el único objeto mutable del sistema: posee la traza, el
//! buffer de inputs pendientes y el índice de nodos de la sesión. El motor
//! externo llama `init` una vez por sesión y luego, por cada nodo evaluado,
//! `before_eval` -> computación propia -> `after_eval`.
//!
//! Ciclo de vida: `Idle -> Active -> Closed`. Los hooks sólo se aceptan en
//! `Active`; un nuevo `init` abre una sesión limpia.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use uuid::Uuid;

use crate::config::TraceConfig;
use crate::dataflow::{Dataflow, PortRef, VertexId};
use crate::engine::{EvalScope, ProvenanceBuilder};
use crate::errors::{ProtocolFault, ProvError};
use crate::hashing::ids;
use crate::index::NodeIndex;
use crate::model::{DataArtifact, Execution, NodeState, Parameter, PortData};
use crate::pending::PendingInputs;
use crate::size::{JsonSizeEstimator, SizeEstimator};
use crate::snapshot::TraceSnapshot;
use crate::trace::ExecutionTrace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Aún no se llamó `init`.
    Idle,
    Active,
    Closed,
}

/// Resolución de un puerto de entrada antes de tocar la traza.
enum InputSlot<'a> {
    Upstream {
        vertex: VertexId,
        node: usize,
        port: &'a str,
    },
    Parameter(String),
}

struct Session {
    id: String,
    workflow: Option<String>,
    index: NodeIndex,
}

pub struct Provenance {
    config: TraceConfig,
    estimator: Box<dyn SizeEstimator>,
    state: SessionState,
    session: Option<Session>,
    time_init: Option<DateTime<Utc>>,
    time_end: Option<DateTime<Utc>>,
    pending: PendingInputs,
    trace: Mutex<ExecutionTrace>,
}

impl Default for Provenance {
    fn default() -> Self {
        Self::new()
    }
}

impl Provenance {
    /// Sesión con configuración por defecto y `JsonSizeEstimator`.
    pub fn new() -> Self {
        Self::from_parts(TraceConfig::default(), Box::new(JsonSizeEstimator))
    }

    pub fn with_config(config: TraceConfig) -> Self {
        Self::from_parts(config, Box::new(JsonSizeEstimator))
    }

    pub fn builder() -> ProvenanceBuilder {
        ProvenanceBuilder::new()
    }

    pub(crate) fn from_parts(config: TraceConfig, estimator: Box<dyn SizeEstimator>) -> Self {
        Self { config,
               estimator,
               state: SessionState::Idle,
               session: None,
               time_init: None,
               time_end: None,
               pending: PendingInputs::new(),
               trace: Mutex::new(ExecutionTrace::new()) }
    }

    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.id.as_str())
    }

    /// Identificador del workflow asociado (None si no hay o no declara uno).
    pub fn workflow(&self) -> Option<&str> {
        self.session.as_ref().and_then(|s| s.workflow.as_deref())
    }

    // ---- ciclo de vida ----

    /// Abre una sesión nueva sobre `dataflow` y devuelve su id.
    ///
    /// Descarta cualquier traza, entrada pendiente o tiempo de una sesión
    /// anterior.
    pub fn init<D: Dataflow + ?Sized>(&mut self, dataflow: &D) -> &str {
        let index = NodeIndex::from_dataflow(dataflow);
        let id = Uuid::new_v4().simple().to_string();
        info!("provenance session {} started (workflow={:?}, nodes={})",
              id,
              dataflow.workflow_id(),
              index.len());
        self.pending.clear();
        *self.trace.get_mut().unwrap_or_else(|poisoned| poisoned.into_inner()) = ExecutionTrace::new();
        self.time_init = None;
        self.time_end = None;
        self.state = SessionState::Active;
        let session = self.session.insert(Session { id,
                                                    workflow: dataflow.workflow_id(),
                                                    index });
        &session.id
    }

    /// Incorpora al índice los vértices agregados al grafo durante la sesión.
    ///
    /// Los vértices ya indexados conservan su índice local; los nuevos se
    /// numeran a continuación. Devuelve cuántos vértices se agregaron.
    pub fn refresh_index<D: Dataflow + ?Sized>(&mut self, dataflow: &D) -> Result<usize, ProvError> {
        if self.state != SessionState::Active {
            return Err(ProvError::SessionNotActive);
        }
        let session = self.session.as_mut().ok_or(ProvError::SessionNotActive)?;
        let added = session.index.extend(dataflow.vertices());
        debug!("node index refreshed for session {} (+{} nodes, {} total)",
               session.id,
               added,
               session.index.len());
        Ok(added)
    }

    /// Cierra la ventana activa. Devuelve los vértices que quedaron con
    /// `before_eval` sin su `after_eval`.
    pub fn close(&mut self) -> Result<Vec<VertexId>, ProvError> {
        if self.state != SessionState::Active {
            return Err(ProvError::SessionNotActive);
        }
        let dangling = self.pending.dangling();
        if !dangling.is_empty() {
            warn!("closing provenance session with {} dangling pending node(s): {:?}",
                  dangling.len(),
                  dangling);
        }
        self.state = SessionState::Closed;
        info!("provenance session {} closed", self.session_id().unwrap_or_default());
        Ok(dangling)
    }

    pub fn time_init(&self) -> Option<DateTime<Utc>> {
        self.time_init
    }

    pub fn time_end(&self) -> Option<DateTime<Utc>> {
        self.time_end
    }

    pub fn set_time_init(&mut self, t: DateTime<Utc>) {
        self.time_init = Some(t);
    }

    pub fn set_time_end(&mut self, t: DateTime<Utc>) {
        self.time_end = Some(t);
    }

    pub fn mark_started(&mut self) {
        self.set_time_init(Utc::now());
    }

    pub fn mark_finished(&mut self) {
        self.set_time_end(Utc::now());
    }

    // ---- consultas ----

    fn active_session(&self) -> Result<&Session, ProvError> {
        match (self.state, &self.session) {
            (SessionState::Active, Some(s)) => Ok(s),
            _ => Err(ProvError::SessionNotActive),
        }
    }

    fn lock_trace(&self) -> Result<MutexGuard<'_, ExecutionTrace>, ProvError> {
        self.trace.lock().map_err(|_| ProvError::Internal("trace lock poisoned".into()))
    }

    /// Ejecuta `f` con acceso de lectura a la traza.
    pub fn with_trace<R>(&self, f: impl FnOnce(&ExecutionTrace) -> R) -> Result<R, ProvError> {
        let trace = self.lock_trace()?;
        Ok(f(&trace))
    }

    /// Índice local de `vertex` en la sesión actual.
    pub fn local_node_id(&self, vertex: VertexId) -> Result<usize, ProvError> {
        let session = self.session.as_ref().ok_or(ProvError::SessionNotActive)?;
        session.index.local_id(vertex)
    }

    /// Última ejecución registrada del nodo local `node`.
    pub fn last_execution(&self, node: usize) -> Result<Option<Execution>, ProvError> {
        self.with_trace(|t| t.last_execution(node).cloned())
    }

    pub fn node_state(&self, vertex: VertexId) -> Result<NodeState, ProvError> {
        if self.pending.contains(vertex) {
            return Ok(NodeState::Pending);
        }
        let node = self.local_node_id(vertex)?;
        let done = self.with_trace(|t| t.last_execution(node).is_some())?;
        Ok(if done { NodeState::Completed } else { NodeState::NotStarted })
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    // ---- hooks ----

    /// Hook previo a la evaluación de `vertex`.
    ///
    /// Resuelve cada puerto de entrada declarado: los conectados toman el id
    /// del dato producido por la última ejecución del nodo aguas arriba; los
    /// no conectados (o alimentados desde un vértice de frontera) se registran
    /// como parámetros raíz. Deja la lista resuelta en el buffer pendiente.
    pub fn before_eval<D: Dataflow + ?Sized>(&self, dataflow: &D, vertex: VertexId) -> Result<(), ProvError> {
        let session = self.active_session()?;
        if dataflow.is_boundary(vertex) {
            debug!("before_eval skipped for boundary vertex {}", vertex);
            return Ok(());
        }
        if self.pending.contains(vertex) {
            return Err(ProvError::ProtocolViolation { vertex,
                                                      fault: ProtocolFault::AlreadyPending });
        }
        let factory = dataflow.factory(vertex).ok_or(ProvError::UnknownVertex(vertex))?;
        let local = session.index.local_id(vertex)?;

        let mut connected: HashMap<usize, PortRef> = HashMap::new();
        for edge in dataflow.in_edges(vertex) {
            if connected.insert(edge.target.index, edge.source).is_some() {
                return Err(ProvError::PortFanIn { vertex,
                                                  port: edge.target.index });
            }
        }

        // valores y tamaños se calculan sin el lock de la traza
        let scheme = self.config.id_scheme;
        let values: Vec<_> = (0..factory.inputs.len()).map(|i| dataflow.input_value(vertex, i).unwrap_or_default())
                                                       .collect();
        let sizes: Vec<usize> = values.iter().map(|v| self.estimator.size_of(v)).collect();
        let mut input_values = None;
        let mut slots = Vec::with_capacity(factory.inputs.len());
        for (i, port) in factory.inputs.iter().enumerate() {
            let slot = match connected.get(&i) {
                Some(src) if !dataflow.is_boundary(src.vertex) => {
                    let upstream = session.index.local_id(src.vertex)?;
                    let up_factory = dataflow.factory(src.vertex).ok_or(ProvError::UnknownVertex(src.vertex))?;
                    let oport = up_factory.outputs
                                          .get(src.index)
                                          .ok_or_else(|| ProvError::SchemaInconsistency { node: upstream,
                                                                                          port: format!("#{}", src.index) })?;
                    InputSlot::Upstream { vertex: src.vertex,
                                          node: upstream,
                                          port: oport.name.as_str() }
                }
                _ => {
                    let all = input_values.get_or_insert_with(|| dataflow.input_values(vertex));
                    InputSlot::Parameter(ids::parameter_data_id(scheme, &factory.name, all, i, &port.name))
                }
            };
            slots.push(slot);
        }

        // primero se resuelven todos los puertos conectados; sólo si todos
        // resuelven se escriben los parámetros
        let mut trace = self.lock_trace()?;
        let mut resolved = Vec::with_capacity(slots.len());
        for slot in slots {
            resolved.push(match slot {
                              InputSlot::Upstream { vertex: up, node, port } => {
                                  let last = trace.last_execution(node)
                                                  .ok_or(ProvError::OrderingViolation { vertex,
                                                                                        upstream: up })?;
                                  (last.output_did(port)?.to_string(), false)
                              }
                              InputSlot::Parameter(did) => (did, true),
                          });
        }
        let mut inputs = Vec::with_capacity(resolved.len());
        for (i, (port, (data, is_parameter))) in factory.inputs.iter().zip(resolved).enumerate() {
            if is_parameter {
                let captured = self.config.capture_parameter_values.then(|| values[i].clone());
                trace.record_data(DataArtifact::parameter(data.clone(), port.declared_type(), captured, sizes[i]));
                trace.record_parameter(Parameter { node: local,
                                                   port: port.name.clone(),
                                                   data: data.clone() });
            }
            inputs.push(PortData { port: port.name.clone(),
                                   data,
                                   size: sizes[i] });
        }
        drop(trace);

        debug!("before_eval vertex={} node={} inputs={}", vertex, local, inputs.len());
        self.pending.stage(vertex, inputs)
    }

    /// Hook posterior a la evaluación de `vertex`.
    ///
    /// Consume la entrada pendiente, acuña un id por cada puerto de salida,
    /// calcula el `task_id` y agrega la `Execution` al log. Devuelve la
    /// ejecución registrada (`None` para vértices de frontera).
    pub fn after_eval<D: Dataflow + ?Sized>(&self,
                                            dataflow: &D,
                                            vertex: VertexId,
                                            elapsed: Duration)
                                            -> Result<Option<Execution>, ProvError> {
        let session = self.active_session()?;
        if dataflow.is_boundary(vertex) {
            debug!("after_eval skipped for boundary vertex {}", vertex);
            return Ok(None);
        }
        let factory = dataflow.factory(vertex).ok_or(ProvError::UnknownVertex(vertex))?;
        let identity = dataflow.node_identity(vertex).ok_or(ProvError::UnknownVertex(vertex))?;
        let local = session.index.local_id(vertex)?;
        let inputs = self.pending.take(vertex)?;

        let scheme = self.config.id_scheme;
        let sizes: Vec<usize> = (0..factory.outputs.len()).map(|i| {
                                                              let value = dataflow.output_value(vertex, i).unwrap_or_default();
                                                              self.estimator.size_of(&value)
                                                          })
                                                          .collect();
        let mut trace = self.lock_trace()?;
        let mut outputs = Vec::with_capacity(factory.outputs.len());
        for (i, port) in factory.outputs.iter().enumerate() {
            let size = sizes[i];
            let did = ids::output_data_id(scheme, &inputs, &identity, i, &port.name);
            trace.record_data(DataArtifact::computed(did.clone(), port.declared_type(), size));
            outputs.push(PortData { port: port.name.clone(),
                                    data: did,
                                    size });
        }

        let execution = Execution { node: local,
                                    task_id: ids::task_id(&inputs, &identity),
                                    cpu_time: elapsed,
                                    inputs,
                                    outputs };
        trace.append_execution(execution.clone());
        debug!("after_eval vertex={} node={} task={} outputs={}",
               vertex,
               local,
               execution.task_id,
               execution.n_output());
        Ok(Some(execution))
    }

    /// `before_eval` + guardia que mide el tiempo y empareja el `after_eval`.
    pub fn begin<D: Dataflow + ?Sized>(&self, dataflow: &D, vertex: VertexId) -> Result<EvalScope<'_>, ProvError> {
        self.before_eval(dataflow, vertex)?;
        Ok(EvalScope::new(self, vertex))
    }

    /// Evalúa `f` entre ambos hooks. Si `f` hace panic la entrada pendiente
    /// se descarta al desenrollar.
    pub fn traced<D, T, F>(&self, dataflow: &D, vertex: VertexId, f: F) -> Result<(T, Option<Execution>), ProvError>
        where D: Dataflow + ?Sized,
              F: FnOnce() -> T
    {
        let scope = self.begin(dataflow, vertex)?;
        let out = f();
        let execution = scope.finish(dataflow)?;
        Ok((out, execution))
    }

    /// Descarta la entrada pendiente de `vertex`, si existe.
    pub fn abandon(&self, vertex: VertexId) -> bool {
        self.pending.discard(vertex)
    }

    // ---- exportación ----

    pub fn as_snapshot(&self) -> Result<TraceSnapshot, ProvError> {
        let session = self.session.as_ref().ok_or(ProvError::SessionNotActive)?;
        let trace = self.lock_trace()?;
        Ok(TraceSnapshot::project(&session.id,
                                  session.workflow.as_deref(),
                                  self.time_init,
                                  self.time_end,
                                  &trace))
    }
}
