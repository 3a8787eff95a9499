// Completion classifier - single-signal duration filter
//
// Short requests on a chat service are metadata, polling, title generation and
// the like. Only completions that took at least the service's threshold count
// as "the answer is ready".

use crate::host::TabId;
use crate::tracker::Completion;

/// A completion that passed the duration filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub tab_id: TabId,
    pub service_name: String,
}

/// Returns `None` for sub-threshold completions
pub fn classify(completion: &Completion) -> Option<Candidate> {
    if completion.elapsed < completion.service.min_duration {
        tracing::trace!(
            tab = %completion.tab_id,
            service = %completion.service.name,
            elapsed_ms = completion.elapsed.as_millis() as u64,
            "Ignoring short request"
        );
        return None;
    }

    Some(Candidate {
        tab_id: completion.tab_id,
        service_name: completion.service.name.clone(),
    })
}
