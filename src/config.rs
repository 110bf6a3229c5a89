/// Fixed interpreter parameters, kept in one place so the loop and parser
/// agree on them.
#[derive(Debug, Clone)]
pub struct Config {
    pub prompt: String,
    /// Longest accepted line, in bytes of content (no trailing newline).
    pub line_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            prompt: "seqsh> ".to_string(),
            line_limit: 512,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.prompt, "seqsh> ");
        assert_eq!(config.line_limit, 512);
    }
}
