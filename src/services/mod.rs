//! Service layer: pure configuration and policy logic.

pub mod agent_registry;
pub mod assembler;
pub mod command_gate;
pub mod gateway;
pub mod model_router;

pub use assembler::{plan_session, SessionPlan};
pub use command_gate::CommandGate;
pub use gateway::ArcadeConfig;
pub use model_router::ModelRouter;
