#[derive(Debug, Clone)]
pub struct GenerateDigestInput {
    pub query: String,
    /// Fetch real articles before prompting instead of relying on the model.
    pub live: bool,
}
