/// One of the two prefixes (header or source) threaded through a parser
/// run.
///
/// A bracket group following a bare token sets the per-annotation
/// override, in effect only for that annotation. A token followed by one
/// or more bracket groups and then a bare newline promotes the override
/// into the sticky value, which then applies to every later annotation
/// in the file that does not supply its own.
#[derive(Clone, Debug, Default)]
pub(crate) struct PrefixSet {
    sticky: Vec<u8>,
    overridden: Option<Vec<u8>>,
}

impl PrefixSet {
    pub(crate) fn effective(&self) -> &[u8] {
        self.overridden.as_deref().unwrap_or(&self.sticky)
    }

    pub(crate) fn set_override(&mut self, value: Vec<u8>) {
        self.overridden = Some(value);
    }

    /// Promotes this annotation's override into the sticky value, if one
    /// was set. Annotations that never touch this prefix leave the
    /// sticky value untouched.
    pub(crate) fn promote_to_sticky(&mut self) {
        if let Some(value) = self.overridden.take() {
            self.sticky = value;
        }
    }

    pub(crate) fn reset_override(&mut self) {
        self.overridden = None;
    }
}
