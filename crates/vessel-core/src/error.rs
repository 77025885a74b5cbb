//! Error types for the vessel containers.
//!
//! Two failure classes can cross the API boundary: the storage system
//! refusing a block ([`AllocError`]) and a caller-supplied element
//! constructor reporting failure ([`ArrayError::Element`]). Precondition
//! violations (bad index, bad position) are not represented here; they
//! are caught by assertions.

use std::alloc::Layout;
use std::error::Error;
use std::fmt;

/// The storage system could not provide a requested block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// The requested slot count cannot be expressed as a valid layout
    /// (more than `isize::MAX` bytes), or the growth computation overflowed.
    CapacityOverflow {
        /// Number of element slots requested.
        requested: usize,
    },
    /// The global allocator returned null for a valid layout.
    OutOfMemory {
        /// The layout that could not be satisfied.
        layout: Layout,
    },
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityOverflow { requested } => {
                write!(f, "capacity overflow: {requested} slots requested")
            }
            Self::OutOfMemory { layout } => {
                write!(
                    f,
                    "out of memory: failed to allocate {} bytes (align {})",
                    layout.size(),
                    layout.align()
                )
            }
        }
    }
}

impl Error for AllocError {}

/// Failure of an operation that constructs elements through a fallible
/// constructor.
///
/// `E` is the constructor's own error type. Operations that cannot fail
/// on element construction use [`std::convert::Infallible`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayError<E> {
    /// Storage for the operation could not be obtained.
    Alloc(AllocError),
    /// An element constructor failed. All partial work was unwound
    /// before this was returned.
    Element(E),
}

impl<E> From<AllocError> for ArrayError<E> {
    fn from(err: AllocError) -> Self {
        Self::Alloc(err)
    }
}

impl<E: fmt::Display> fmt::Display for ArrayError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alloc(err) => write!(f, "allocation failed: {err}"),
            Self::Element(err) => write!(f, "element construction failed: {err}"),
        }
    }
}

impl<E: Error + 'static> Error for ArrayError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Alloc(err) => Some(err),
            Self::Element(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    struct Refused;

    impl fmt::Display for Refused {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("refused")
        }
    }

    impl Error for Refused {}

    #[test]
    fn capacity_overflow_message_names_request() {
        let err = AllocError::CapacityOverflow { requested: 7 };
        assert_eq!(err.to_string(), "capacity overflow: 7 slots requested");
    }

    #[test]
    fn out_of_memory_message_reports_layout() {
        let layout = Layout::from_size_align(64, 8).unwrap();
        let err = AllocError::OutOfMemory { layout };
        assert_eq!(
            err.to_string(),
            "out of memory: failed to allocate 64 bytes (align 8)"
        );
    }

    #[test]
    fn alloc_error_converts_into_array_error() {
        let err: ArrayError<Refused> = AllocError::CapacityOverflow { requested: 1 }.into();
        assert!(matches!(err, ArrayError::Alloc(_)));
    }

    #[test]
    fn source_chains_to_underlying_error() {
        let err: ArrayError<Refused> = ArrayError::Element(Refused);
        assert_eq!(err.source().unwrap().to_string(), "refused");

        let err: ArrayError<Refused> = AllocError::CapacityOverflow { requested: 3 }.into();
        assert!(err.source().unwrap().is::<AllocError>());
    }

    #[test]
    fn element_error_display_wraps_inner() {
        let err: ArrayError<Refused> = ArrayError::Element(Refused);
        assert_eq!(err.to_string(), "element construction failed: refused");
    }
}
