//! Opt-in, type-specific sanitisation that runs after tag-driven masking.

use super::node::Sanitise;

/// Context-aware self-sanitisation.
///
/// Implement this for masking rules that tags cannot express (masking one
/// field depending on another, partial scrubbing of a string, ...), then opt
/// the type in with `#[sanitise(hook)]`:
///
/// ```rust
/// use sanitise::{Sanitise, SelfSanitise};
///
/// #[derive(Clone, Debug, Default, PartialEq, Sanitise)]
/// #[sanitise(hook)]
/// struct Card {
///     #[sanitise("logs")]
///     cvv: String,
///     number: String,
/// }
///
/// impl SelfSanitise for Card {
///     fn sanitise(&mut self, context: &str) {
///         if context == "logs" {
///             let keep = self.number.len().saturating_sub(4);
///             self.number.replace_range(..keep, &"*".repeat(keep));
///         }
///     }
/// }
///
/// let card = Card { cvv: "123".into(), number: "4111111111111111".into() };
/// let clean = sanitise::sanitise(&card, "logs").unwrap();
/// assert_eq!(clean.cvv, "");
/// assert_eq!(clean.number, "************1111");
/// ```
///
/// The hook receives the sanitised copy, never the source: fields masked by
/// tags are already zeroed when it runs, so it can only mask further.
pub trait SelfSanitise {
    /// Applies additional masking for `context`.
    fn sanitise(&mut self, context: &str);
}

/// Runs `value`'s hook, if it exposes one. Returns whether a hook ran.
pub(crate) fn dispatch<T: Sanitise>(value: &mut T, context: &str) -> bool {
    match value.as_self_sanitise() {
        Some(hook) => {
            hook.sanitise(context);
            true
        }
        None => false,
    }
}
