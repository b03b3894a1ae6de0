#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid front matter: {0}")]
    Frontmatter(#[from] serde_yaml::Error),
    #[error("Front matter is not a mapping")]
    FrontmatterNotMapping,
    #[error("Unrepresentable front matter value: {0}")]
    FrontmatterValue(#[from] serde_json::Error),
}
