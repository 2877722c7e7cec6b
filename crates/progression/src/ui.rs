use stellar_common::BodyHandle;
use stellar_mutation::{MutationId, Offer};

/// Presentation side of the checkpoint flow.
///
/// The core decides what to offer; the UI shows it and later reports the
/// player's pick back through the coordinator.
pub trait ProgressionUi {
    fn show_branch_selection(&mut self, body: BodyHandle);
    fn show_mutation_selection(&mut self, body: BodyHandle, offers: &[Offer<'_>]);
}

/// A request the coordinator forwarded to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiRequest {
    BranchSelection {
        body: BodyHandle,
    },
    MutationSelection {
        body: BodyHandle,
        offered: Vec<MutationId>,
    },
}

/// Headless UI that keeps every request it receives.
#[derive(Debug, Default)]
pub struct RecordingUi {
    requests: Vec<UiRequest>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> &[UiRequest] {
        &self.requests
    }

    pub fn drain(&mut self) -> Vec<UiRequest> {
        std::mem::take(&mut self.requests)
    }
}

impl ProgressionUi for RecordingUi {
    fn show_branch_selection(&mut self, body: BodyHandle) {
        self.requests.push(UiRequest::BranchSelection { body });
    }

    fn show_mutation_selection(&mut self, body: BodyHandle, offers: &[Offer<'_>]) {
        for offer in offers {
            tracing::debug!(%body, mutation = %offer.mutation.name, "offering mutation");
        }
        self.requests.push(UiRequest::MutationSelection {
            body,
            offered: offers.iter().map(|o| o.id).collect(),
        });
    }
}
