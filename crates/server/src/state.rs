use std::sync::Arc;

use events::EventBus;
use orchestrator::Crew;

#[derive(Clone)]
pub struct AppState {
    pub crew: Arc<Crew>,
    pub event_bus: EventBus,
}

impl AppState {
    pub fn new(crew: Arc<Crew>, event_bus: EventBus) -> Self {
        Self { crew, event_bus }
    }
}
