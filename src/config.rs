//! Process-wide debug toggles consumed by the core (SPEC_FULL.md §6).
//!
//! None of these gate *correctness*: every toggle either widens logging,
//! disables an optimization pass, or redirects a side-output. A pipeline
//! built with every toggle off must still be sound.

/// Config toggles consumed by the transform pipeline. See
/// [`ConfigBuilder`] for the fluent way to construct one.
/// # Example
/// ```
/// # use gapir_core::config::ConfigBuilder;
/// let cfg = ConfigBuilder::new()
///     .disable_dead_code_elimination(false)
///     .dead_sub_cmd_elimination(true)
///     .build();
/// assert!(cfg.dead_sub_cmd_elimination);
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Verbose replay traces.
    pub debug_replay: bool,
    /// Verbose builder checks during replay-opcode emission.
    pub debug_replay_builder: bool,
    /// Skip the DCE transform (C9) entirely.
    pub disable_dead_code_elimination: bool,
    /// Include subcommand-level liveness in DCE.
    pub dead_sub_cmd_elimination: bool,
    /// Per-address trace logs during DCE.
    pub debug_dead_code_elimination: bool,
    /// Trace the dependency-graph build pass.
    pub debug_dependency_graph: bool,
    /// Dump a replay profile.
    pub dump_replay_profile: bool,
    /// Dump a validation trace.
    pub dump_validation_trace: bool,
    /// Treat every command before the first request as live, bypassing DCE
    /// for the "warm-up" portion of a capture.
    pub all_initial_commands_live: bool,
    /// Widen [`FileLog`](crate::transform::file_log::FileLog) output with extras.
    pub log_extras_in_transforms: bool,
    /// Widen [`FileLog`](crate::transform::file_log::FileLog) output with memory-observation bytes.
    pub log_memory_in_extras: bool,
    /// Side-write address-to-command mappings to a file.
    pub log_mappings_to_file: bool,
    /// Side-write every transform's output to a file.
    pub log_transforms_to_file: bool,
    /// Side-write every transform's output to a capture.
    pub log_transforms_to_capture: bool,
    /// Log issues found while replaying the initial commands.
    pub log_initial_cmds_issues: bool,
    /// Side-write initial commands to a capture.
    pub log_initial_cmds_to_capture: bool,
    /// Allocate a private [`State`](crate::state::State) clone per transform layer.
    pub separate_mutate_states: bool,
    /// After a run, diff the rebuilt state against the original.
    pub check_rebuilt_state_matches: bool,
}

impl Default for Config {
    /// All toggles default to off: the pipeline runs at full optimization
    /// with no side-output noise.
    fn default() -> Self {
        Config {
            debug_replay: false,
            debug_replay_builder: false,
            disable_dead_code_elimination: false,
            dead_sub_cmd_elimination: false,
            debug_dead_code_elimination: false,
            debug_dependency_graph: false,
            dump_replay_profile: false,
            dump_validation_trace: false,
            all_initial_commands_live: false,
            log_extras_in_transforms: false,
            log_memory_in_extras: false,
            log_mappings_to_file: false,
            log_transforms_to_file: false,
            log_transforms_to_capture: false,
            log_initial_cmds_issues: false,
            log_initial_cmds_to_capture: false,
            separate_mutate_states: false,
            check_rebuilt_state_matches: false,
        }
    }
}

/// Convenience builder for [`Config`].
pub struct ConfigBuilder {
    inner: Config,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            inner: Config::default(),
        }
    }
}

macro_rules! toggle {
    ($name:ident) => {
        /// Set the
        #[doc = stringify!($name)]
        /// toggle.
        pub fn $name(mut self, value: bool) -> Self {
            self.inner.$name = value;
            self
        }
    };
}

impl ConfigBuilder {
    /// Create a new builder with every toggle off.
    pub fn new() -> Self {
        Self::default()
    }

    toggle!(debug_replay);
    toggle!(debug_replay_builder);
    toggle!(disable_dead_code_elimination);
    toggle!(dead_sub_cmd_elimination);
    toggle!(debug_dead_code_elimination);
    toggle!(debug_dependency_graph);
    toggle!(dump_replay_profile);
    toggle!(dump_validation_trace);
    toggle!(all_initial_commands_live);
    toggle!(log_extras_in_transforms);
    toggle!(log_memory_in_extras);
    toggle!(log_mappings_to_file);
    toggle!(log_transforms_to_file);
    toggle!(log_transforms_to_capture);
    toggle!(log_initial_cmds_issues);
    toggle!(log_initial_cmds_to_capture);
    toggle!(separate_mutate_states);
    toggle!(check_rebuilt_state_matches);

    /// Obtain the built [`Config`].
    pub fn build(self) -> Config {
        self.inner
    }
}
