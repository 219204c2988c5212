/// What INPUT does with a reply it cannot assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPolicy {
    /// Print `?REDO FROM START` and ask again.
    Redo,
    /// Abort the run with an error.
    Fail,
}

/// ## Runtime settings

#[derive(Debug, Clone)]
pub struct Config {
    pub input_policy: InputPolicy,
    /// Maximum depth of the GOSUB and FOR stacks.
    pub stack_limit: usize,
    /// Column width of the zones a PRINT comma advances to.
    pub print_zone: usize,
    /// Seed for RND; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            input_policy: InputPolicy::Redo,
            stack_limit: u16::max_value() as usize,
            print_zone: 14,
            seed: None,
        }
    }
}
