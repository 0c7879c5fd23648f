/// Receives solver events and optionally steers the iteration.
///
/// Returning `Some(action)` requests a solver-specific action; `None` lets
/// the solver continue. Closures `FnMut(&E) -> Option<A>` are observers, and
/// `()` is the no-op observer.
pub trait Observer<E, A> {
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}
