/// Watches solver progress and optionally steers it.
///
/// Each solver defines its own event type `E` and action type `A`. An observer
/// sees every event the solver emits and may answer with an action, such as
/// stopping early. Returning `None` lets the solver continue unchanged.
///
/// Closures of the form `FnMut(&E) -> Option<A>` are observers, and `()` is the
/// no-op observer used by the `*_unobserved` solver entry points.
pub trait Observer<E, A> {
    /// Observes one solver event and optionally returns a control action.
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

#[cfg(test)]
mod tests {
    use super::*;

    fn drive<O: Observer<usize, &'static str>>(mut observer: O, events: usize) -> Vec<&'static str> {
        (0..events).filter_map(|e| observer.observe(&e)).collect()
    }

    #[test]
    fn closure_observer_sees_every_event() {
        let mut seen = Vec::new();
        let actions = drive(
            |e: &usize| {
                seen.push(*e);
                (*e == 2).then_some("stop")
            },
            4,
        );

        assert_eq!(actions, vec!["stop"]);
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }

    #[test]
    fn unit_observer_never_acts() {
        assert!(drive((), 10).is_empty());
    }
}
