//! Capability traits consumed by the template lifecycle engine.

pub mod git;
pub mod network_probe;
pub mod questionnaire;
pub mod scaffold_io;
pub mod script_runner;
pub mod store;

pub use git::GitPort;
pub use network_probe::NetworkProbePort;
pub use questionnaire::QuestionnairePort;
pub use scaffold_io::ScaffoldIoPort;
pub use script_runner::{ScriptInvocation, ScriptRunnerPort};
pub use store::TemplateStorePort;
