pub const APP_NAME: &str = "flipotron";
pub const CONFIG_NAME: &str = "config";
pub const CONFIG_PATH_ENV: &str = "FLIPOTRON_CONFIG";

#[cfg(target_os = "macos")]
pub const DEFAULT_PRIMARY_LAYOUT: &str = "com.apple.keylayout.ABC";
#[cfg(target_os = "macos")]
pub const DEFAULT_SECONDARY_LAYOUT: &str = "com.apple.keylayout.RussianWin";

#[cfg(windows)]
pub const DEFAULT_PRIMARY_LAYOUT: &str = "00000409";
#[cfg(windows)]
pub const DEFAULT_SECONDARY_LAYOUT: &str = "00000419";

#[cfg(not(any(windows, target_os = "macos")))]
pub const DEFAULT_PRIMARY_LAYOUT: &str = "us";
#[cfg(not(any(windows, target_os = "macos")))]
pub const DEFAULT_SECONDARY_LAYOUT: &str = "ru";

pub const MAX_SETTLE_MS: u32 = 5000;
