pub trait Parser {
    type Output;

    fn parse(&self, content: &str) -> Result<Vec<Self::Output>, String>;

    fn is_supported(&self, filename: Option<&str>, content: &str) -> bool;
}
