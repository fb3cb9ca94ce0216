//! Backend commands queued from UI to backend worker.

use client_core::SubmitTicket;

#[derive(Debug)]
pub enum BackendCommand {
    Shorten { ticket: SubmitTicket },
    CheckHealth,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Shorten { .. } => "shorten",
            BackendCommand::CheckHealth => "check_health",
        }
    }
}
