use crate::cli::ShellConfig;

/// Display policy for the interactive session: the input prompt text and
/// the prefix that labels each echoed result.
#[derive(Debug, Clone)]
pub struct PromptStyle {
    input: String,
    result_template: Option<String>,
}

impl PromptStyle {
    pub fn new(input: &str, result_template: Option<&str>) -> Self {
        Self {
            input: input.to_string(),
            result_template: result_template.map(str::to_string),
        }
    }

    pub fn from_config(config: &ShellConfig) -> Self {
        Self::new(&config.prompt, config.result_prefix.as_deref())
    }

    /// The configured prompt, verbatim.
    pub fn input_prompt(&self) -> &str {
        &self.input
    }

    /// The pieces of the result prefix for the given execution count.
    /// Without a template this is the traditional `Out[n]: ` triple; with
    /// one, the single string produced by substituting the count into the
    /// `{}` placeholder.
    pub fn result_tokens(&self, count: usize) -> Vec<String> {
        match &self.result_template {
            None => vec!["Out[".to_string(), count.to_string(), "]: ".to_string()],
            Some(template) => vec![template.replacen("{}", &count.to_string(), 1)],
        }
    }

    pub fn result_prefix(&self, count: usize) -> String {
        self.result_tokens(count).concat()
    }
}
