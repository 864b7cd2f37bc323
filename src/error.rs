use std::fmt;

/// The requested block dimensions are not part of the enabled block-size catalog.
///
/// This is an integration bug on the caller's side, not a data error, so it
/// should be surfaced rather than clamped to a neighbouring size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsupportedShape {
    pub width: usize,
    pub height: usize,
}

impl fmt::Display for UnsupportedShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unsupported OBMC block size {}x{}: no kernel is enabled for this shape",
            self.width, self.height
        )
    }
}

impl std::error::Error for UnsupportedShape {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_shape_message() {
        let err = UnsupportedShape {
            width: 4,
            height: 16,
        };
        assert_eq!(
            err.to_string(),
            "unsupported OBMC block size 4x16: no kernel is enabled for this shape"
        );
    }

    #[test]
    fn unsupported_shape_into_anyhow() {
        let err: anyhow::Error = UnsupportedShape {
            width: 3,
            height: 3,
        }
        .into();
        assert_eq!(
            err.downcast_ref::<UnsupportedShape>(),
            Some(&UnsupportedShape {
                width: 3,
                height: 3
            })
        );
    }
}
