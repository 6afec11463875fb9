//! Replays recorded RPC calls from a cassette.

use std::collections::{BTreeMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Serves a cassette's interactions back, in recorded order per
/// `service`/`method` pair.
///
/// Calls to different pairs may interleave differently from the recording;
/// calls to the same pair must arrive in the same order with the same
/// parameters.
pub struct CassetteReplayer {
    pending: BTreeMap<(String, String), VecDeque<Interaction>>,
}

impl CassetteReplayer {
    /// Queues every interaction of `cassette`.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut pending: BTreeMap<(String, String), VecDeque<Interaction>> = BTreeMap::new();
        for interaction in &cassette.interactions {
            pending
                .entry((interaction.service.clone(), interaction.method.clone()))
                .or_default()
                .push_back(interaction.clone());
        }
        Self { pending }
    }

    /// Removes and returns the next interaction recorded for
    /// `service`/`method`.
    ///
    /// # Panics
    ///
    /// Panics if nothing is left for the pair, or if the recorded parameters
    /// differ from `params`. A replay that strays from its recording is a
    /// broken test.
    pub fn next_interaction(&mut self, service: &str, method: &str, params: &str) -> Interaction {
        let queue = self.pending.get_mut(&(service.to_string(), method.to_string()));
        let Some(interaction) = queue.and_then(VecDeque::pop_front) else {
            let left: Vec<String> = self
                .pending
                .iter()
                .filter(|(_, queue)| !queue.is_empty())
                .map(|((s, m), queue)| format!("{s}/{m} x{}", queue.len()))
                .collect();
            panic!(
                "Cassette exhausted: no interactions recorded for {service}/{method}. \
                 Still pending: [{}]",
                left.join(", ")
            );
        };

        assert!(
            interaction.params == params,
            "Replay diverged at seq={} ({service}/{method}): recorded params {:?}, got {params:?}",
            interaction.seq,
            interaction.params,
        );
        interaction
    }

    /// Number of interactions not yet served.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pending.values().map(VecDeque::len).sum()
    }
}
