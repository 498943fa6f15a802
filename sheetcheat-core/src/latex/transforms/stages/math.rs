//! Math normalization stage

use crate::latex::math::{ensure_differential, isolate_display_math, MathOptions};
use crate::latex::transforms::{Runnable, TransformError};
use log::debug;

/// Math normalization stage
///
/// Runs the differential repair, then display math isolation, each only when enabled.
#[derive(Default)]
pub struct NormalizeMath {
    options: MathOptions,
}

impl NormalizeMath {
    pub fn new(options: MathOptions) -> Self {
        NormalizeMath { options }
    }
}

impl Runnable<String, String> for NormalizeMath {
    fn run(&self, input: String) -> Result<String, TransformError> {
        let mut text = input;
        if self.options.repair_differentials {
            text = ensure_differential(&text, &self.options);
        }
        if self.options.isolate_display {
            text = isolate_display_math(&text);
        }
        debug!(
            "event=math repair_differentials={} isolate_display={} variable={}",
            self.options.repair_differentials, self.options.isolate_display, self.options.variable
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_repairs() {
        let result = NormalizeMath::default()
            .run("a \\[\\int x\\] b".to_string())
            .unwrap();
        assert_eq!(result, "a\n\\[\n\\int x\\,dx\n\\]\nb");
    }

    #[test]
    fn test_disabled_repairs_pass_through() {
        let stage = NormalizeMath::new(MathOptions {
            repair_differentials: false,
            isolate_display: false,
            ..MathOptions::default()
        });
        let text = "a \\[\\int x\\] b".to_string();
        assert_eq!(stage.run(text.clone()).unwrap(), text);
    }
}
