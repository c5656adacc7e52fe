use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Display, Formatter};

// -----------------------------------------------------------------------------
// Trail

enum Step {
    Key(String),
    Index(usize),
}

/// The position of the walk inside a payload, e.g. `$.children[1].camel_case`.
///
/// Errors capture it as a string when they are raised.
#[derive(Default)]
pub(crate) struct Trail {
    steps: Vec<Step>,
}

impl Trail {
    pub const fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn push_key(&mut self, key: &str) {
        self.steps.push(Step::Key(String::from(key)));
    }

    pub fn push_index(&mut self, index: usize) {
        self.steps.push(Step::Index(index));
    }

    pub fn pop(&mut self) {
        self.steps.pop();
    }

    pub fn path(&self) -> String {
        alloc::format!("{self}")
    }
}

impl Display for Trail {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for step in &self.steps {
            match step {
                Step::Key(key) => write!(f, ".{key}")?,
                Step::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// trace_walk

/// Emits a `trace` record about the walk; debug builds with the `debug`
/// feature append the trail.
macro_rules! trace_walk {
    ($trail:expr, $($arg:tt)+) => {{
        #[cfg(all(debug_assertions, feature = "debug"))]
        log::trace!("{} at {}", format_args!($($arg)+), $trail);
        #[cfg(not(all(debug_assertions, feature = "debug")))]
        {
            let _ = &$trail;
            log::trace!($($arg)+);
        }
    }};
}

pub(crate) use trace_walk;

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Trail;

    #[test]
    fn formats_keys_and_indices() {
        let mut trail = Trail::new();
        assert_eq!(trail.path(), "$");

        trail.push_key("children");
        trail.push_index(1);
        trail.push_key("camel_case");
        assert_eq!(trail.path(), "$.children[1].camel_case");

        trail.pop();
        trail.pop();
        assert_eq!(trail.path(), "$.children");
    }
}
