//! Pre/post dispatch interception.
//!
//! Hooks run at two fixed points in the dispatch lifecycle: before
//! resolution (pre) and after invocation (post). Each hook may return a
//! result; the first non-`None` return in a phase halts the remaining hooks
//! and becomes authoritative - a pre-hook short-circuit skips resolution,
//! decoding, and invocation entirely, a post-hook short-circuit replaces
//! whatever the handler produced.
//!
//! Two scopes exist: an instance scope owned by one dispatcher, and a
//! shared scope ([`SharedHooks`]) that can be attached to many dispatchers.
//! At dispatch time both scopes merge into one sequence ordered by priority
//! (higher first), with ties broken shared-scope-first and then by
//! registration order.

use crate::dispatcher::DispatchOutcome;
use crate::request::RestRequest;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// The two interception points of a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPhase {
    Pre,
    Post,
}

/// A hook callback: receives the request and the in-progress result
/// (`None` during the pre phase), returns a terminal result to
/// short-circuit or `None` to let processing continue.
pub type HookFn =
    Arc<dyn Fn(&RestRequest, Option<&DispatchOutcome>) -> Option<DispatchOutcome> + Send + Sync>;

struct HookEntry {
    priority: i32,
    seq: u64,
    callback: HookFn,
}

/// An ordered collection of pre and post hooks for one scope.
#[derive(Default)]
pub struct HookSet {
    pre: Vec<HookEntry>,
    post: Vec<HookEntry>,
    next_seq: u64,
}

impl HookSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook. Higher priority runs earlier; equal priority
    /// preserves registration order.
    pub fn attach<F>(&mut self, phase: HookPhase, priority: i32, callback: F)
    where
        F: Fn(&RestRequest, Option<&DispatchOutcome>) -> Option<DispatchOutcome>
            + Send
            + Sync
            + 'static,
    {
        let entry = HookEntry {
            priority,
            seq: self.next_seq,
            callback: Arc::new(callback),
        };
        self.next_seq += 1;
        match phase {
            HookPhase::Pre => self.pre.push(entry),
            HookPhase::Post => self.post.push(entry),
        }
    }

    fn entries(&self, phase: HookPhase) -> &[HookEntry] {
        match phase {
            HookPhase::Pre => &self.pre,
            HookPhase::Post => &self.post,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pre.is_empty() && self.post.is_empty()
    }
}

/// A hook registry shared between dispatchers.
///
/// Registration takes `&self` so one `Arc<SharedHooks>` can be handed to
/// several dispatchers; dispatch only takes the read lock.
#[derive(Default)]
pub struct SharedHooks {
    inner: RwLock<HookSet>,
}

impl SharedHooks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook in the shared scope.
    pub fn attach<F>(&self, phase: HookPhase, priority: i32, callback: F)
    where
        F: Fn(&RestRequest, Option<&DispatchOutcome>) -> Option<DispatchOutcome>
            + Send
            + Sync
            + 'static,
    {
        let mut guard = match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.attach(phase, priority, callback);
    }
}

/// Run one phase over the merged shared + instance hook sequence.
///
/// Returns the first non-`None` hook result, or `None` if every hook
/// declined.
pub(crate) fn run_phase(
    phase: HookPhase,
    instance: &HookSet,
    shared: Option<&SharedHooks>,
    request: &RestRequest,
    in_progress: Option<&DispatchOutcome>,
) -> Option<DispatchOutcome> {
    // (priority, source rank, registration seq, callback); shared scope
    // ranks before instance scope at equal priority.
    let mut merged: Vec<(i32, u8, u64, HookFn)> = Vec::new();

    if let Some(shared) = shared {
        let guard = match shared.inner.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        for entry in guard.entries(phase) {
            merged.push((entry.priority, 0, entry.seq, Arc::clone(&entry.callback)));
        }
    }
    for entry in instance.entries(phase) {
        merged.push((entry.priority, 1, entry.seq, Arc::clone(&entry.callback)));
    }

    merged.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)).then(a.2.cmp(&b.2)));

    for (priority, _, _, callback) in &merged {
        if let Some(result) = callback(request, in_progress) {
            debug!(phase = ?phase, priority, "hook returned a terminal result");
            return Some(result);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::Response;
    use http::Method;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn marker(status: u16) -> Option<DispatchOutcome> {
        Some(DispatchOutcome::Response(Response::with_status(status)))
    }

    #[test]
    fn test_new_set_is_empty() {
        assert!(HookSet::new().is_empty());
        let mut hooks = HookSet::new();
        hooks.attach(HookPhase::Post, 0, |_, _| None);
        assert!(!hooks.is_empty());
    }

    #[test]
    fn test_higher_priority_runs_first() {
        let mut hooks = HookSet::new();
        hooks.attach(HookPhase::Pre, -5, |_, _| marker(501));
        hooks.attach(HookPhase::Pre, 10, |_, _| marker(502));

        let request = RestRequest::new(Method::GET);
        let result = run_phase(HookPhase::Pre, &hooks, None, &request, None);
        match result {
            Some(DispatchOutcome::Response(response)) => assert_eq!(response.status, 502),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_short_circuit_halts_remaining_hooks() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);

        let mut hooks = HookSet::new();
        hooks.attach(HookPhase::Pre, 10, |_, _| {
            CALLS.fetch_add(1, Ordering::SeqCst);
            marker(200)
        });
        hooks.attach(HookPhase::Pre, 0, |_, _| {
            CALLS.fetch_add(1, Ordering::SeqCst);
            None
        });

        let request = RestRequest::new(Method::GET);
        let _ = run_phase(HookPhase::Pre, &hooks, None, &request, None);
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_shared_scope_wins_priority_ties() {
        let shared = SharedHooks::new();
        shared.attach(HookPhase::Pre, 1, |_, _| marker(201));

        let mut instance = HookSet::new();
        instance.attach(HookPhase::Pre, 1, |_, _| marker(202));

        let request = RestRequest::new(Method::GET);
        let result = run_phase(HookPhase::Pre, &instance, Some(&shared), &request, None);
        match result {
            Some(DispatchOutcome::Response(response)) => assert_eq!(response.status, 201),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
