/// Page visibility transitions the frame loop reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageTransition {
    Hide,
    Show,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopAction {
    /// Keep the GPU state and callback; the page may come back from the
    /// back/forward cache.
    Pause,
    Resume,
    /// Tear everything down for good.
    Stop,
    Ignore,
}

/// `persisted` is `PageTransitionEvent.persisted`: true when the page enters
/// or leaves the back/forward cache.
pub fn loop_action(transition: PageTransition, persisted: bool) -> LoopAction {
    match (transition, persisted) {
        (PageTransition::Hide, true) => LoopAction::Pause,
        (PageTransition::Hide, false) => LoopAction::Stop,
        (PageTransition::Show, true) => LoopAction::Resume,
        // A fresh load runs init itself
        (PageTransition::Show, false) => LoopAction::Ignore,
    }
}
