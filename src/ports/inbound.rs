//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: UI/CLI drives one lesson session.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Take attendance: load roster, edit statuses, submit.
    async fn run_attendance(&self) -> Result<(), DomainError>;

    /// Pick objectives from the catalog and save them.
    async fn run_objectives(&self) -> Result<(), DomainError>;

    /// Main menu loop.
    async fn run(&self) -> Result<(), DomainError>;
}
