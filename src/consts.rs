pub mod ui_consts {
    //! Terminal UI Constants

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// How long the splash screen stays up unless a key is pressed.
    pub const SPLASH_DURATION_MS: u64 = 1500;

    /// Poll interval for terminal input.
    pub const INPUT_POLL_MS: u64 = 100;

    /// Background color when painting is enabled.
    pub const BACKGROUND_RGB: (u8, u8, u8) = (16, 20, 24);
}
