//! Ergonomic testing utilities for reducers
//!
//! Given-When-Then syntax over a single action or a sequence of actions.
//! Wizard-style reducers are mostly about what a *sequence* of selections
//! leaves behind, so `when_actions` feeds several actions through the reducer
//! and the effect assertions see the effects of the last one.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use marquee_core::{effect::Effect, reducer::Reducer};

/// Type alias for state assertion functions
type StateAssertion<S> = Box<dyn FnOnce(&S)>;

/// Type alias for effect assertion functions
type EffectAssertion<A> = Box<dyn FnOnce(&[Effect<A>])>;

/// Fluent API for testing reducers with Given-When-Then syntax
///
/// # Example
///
/// ```ignore
/// use marquee_testing::ReducerTest;
///
/// ReducerTest::new(BookingReducer::new())
///     .with_env(test_environment())
///     .given_state(BookingState::default())
///     .when_actions([
///         BookingAction::SelectMovie(Some(movie)),
///         BookingAction::SelectTheater(Some(theater)),
///     ])
///     .then_state(|state| {
///         assert!(state.selected_date.is_none());
///     })
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<S>,
    actions: Vec<A>,
    state_assertions: Vec<StateAssertion<S>>,
    effect_assertions: Vec<EffectAssertion<A>>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            actions: Vec::new(),
            state_assertions: Vec::new(),
            effect_assertions: Vec::new(),
        }
    }

    /// Set the environment for the test
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Add an action to reduce (When)
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.actions.push(action);
        self
    }

    /// Add several actions to reduce in order (When)
    #[must_use]
    pub fn when_actions<I>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = A>,
    {
        self.actions.extend(actions);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the effects of the last action (Then)
    #[must_use]
    pub fn then_effects<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[Effect<A>]) + 'static,
    {
        self.effect_assertions.push(Box::new(assertion));
        self
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if initial state, actions, or environment is not set,
    /// or if any assertions fail.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let mut state = self
            .initial_state
            .expect("Initial state must be set with given_state()");

        assert!(
            !self.actions.is_empty(),
            "At least one action must be set with when_action()"
        );

        let env = self
            .environment
            .expect("Environment must be set with with_env()");

        let mut effects = Vec::new();
        for action in self.actions {
            effects = self.reducer.reduce(&mut state, action, &env).into_vec();
        }

        for assertion in self.state_assertions {
            assertion(&state);
        }

        for assertion in self.effect_assertions {
            assertion(effects.as_slice());
        }
    }
}

/// Helper assertions for effects
pub mod assertions {
    use marquee_core::effect::Effect;

    /// Assert that there are no effects
    ///
    /// # Panics
    ///
    /// Panics if effects is not empty.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().all(Effect::is_none),
            "Expected no effects, but found {}: {:?}",
            effects.len(),
            effects
        );
    }

    /// Assert the number of effects
    ///
    /// # Panics
    ///
    /// Panics if the number of effects doesn't match expected.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(
            effects.len(),
            expected,
            "Expected {} effects, but found {}",
            expected,
            effects.len()
        );
    }

    /// Assert that effects contain at least one Future effect
    ///
    /// # Panics
    ///
    /// Panics if no Future effect is found.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_has_future_effect<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().any(|e| matches!(e, Effect::Future(_))),
            "Expected at least one Future effect, but none found"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::effect::Effect;
    use marquee_core::reducer::Reducer;
    use marquee_core::{SmallVec, smallvec};

    #[derive(Clone, Debug, Default)]
    struct PickerState {
        picked: Option<char>,
        confirmed: bool,
    }

    #[derive(Clone, Debug)]
    enum PickerAction {
        Pick(char),
        Confirm,
        Confirmed,
    }

    struct PickerReducer;

    struct PickerEnv;

    impl Reducer for PickerReducer {
        type State = PickerState;
        type Action = PickerAction;
        type Environment = PickerEnv;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                PickerAction::Pick(c) => {
                    state.picked = Some(c);
                    state.confirmed = false;
                    SmallVec::new()
                },
                PickerAction::Confirm => {
                    smallvec![Effect::future(async { Some(PickerAction::Confirmed) })]
                },
                PickerAction::Confirmed => {
                    state.confirmed = true;
                    smallvec![Effect::None]
                },
            }
        }
    }

    #[test]
    fn test_single_action() {
        ReducerTest::new(PickerReducer)
            .with_env(PickerEnv)
            .given_state(PickerState::default())
            .when_action(PickerAction::Pick('a'))
            .then_state(|state| {
                assert_eq!(state.picked, Some('a'));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_action_sequence_sees_last_effects() {
        ReducerTest::new(PickerReducer)
            .with_env(PickerEnv)
            .given_state(PickerState::default())
            .when_actions([PickerAction::Pick('a'), PickerAction::Pick('b'), PickerAction::Confirm])
            .then_state(|state| {
                assert_eq!(state.picked, Some('b'));
                assert!(!state.confirmed);
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn test_effect_none_counts_as_no_effects() {
        ReducerTest::new(PickerReducer)
            .with_env(PickerEnv)
            .given_state(PickerState::default())
            .when_action(PickerAction::Confirmed)
            .then_state(|state| assert!(state.confirmed))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    #[should_panic(expected = "At least one action")]
    fn test_missing_action_panics() {
        ReducerTest::new(PickerReducer)
            .with_env(PickerEnv)
            .given_state(PickerState::default())
            .run();
    }
}
