//! Temporary variable names.

/// Hands out `tmp1`, `tmp2`, ... for one rendered template.
///
/// A fresh namer is created for every template execution so names only have
/// to be unique within a single function body.
#[derive(Debug, Default)]
pub struct Namer {
    next: usize,
}

impl Namer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next unused temporary name.
    pub fn temp(&mut self) -> String {
        self.next += 1;
        format!("tmp{}", self.next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_sequential() {
        let mut namer = Namer::new();
        assert_eq!(namer.temp(), "tmp1");
        assert_eq!(namer.temp(), "tmp2");
        assert_eq!(Namer::new().temp(), "tmp1");
    }
}
