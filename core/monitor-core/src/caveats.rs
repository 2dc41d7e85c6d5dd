//! Post-install notes shown after a successful install.

use crate::paths::InstallPaths;
use crate::platform::Platform;

/// Returns the caveats text for `platform`.
pub fn caveats(platform: Platform, paths: &InstallPaths) -> String {
    match platform {
        Platform::MacOs => "\
SwiftBar plugin installed to your SwiftBar plugins directory.

The plugin requires:
1. Claude CLI installed and authenticated
2. Configuration in ~/.claude.json (run configure-claude-json.sh)
3. SwiftBar running (optionally set to start at login)

To refresh the plugin manually, click the menu bar item and select \"Refresh\".
The plugin auto-refreshes every 30 seconds.
"
        .to_string(),
        Platform::Linux => format!(
            "\
Polybar module files installed to {}/

To use:
1. Add the config snippet to your ~/.config/polybar/config.ini
2. Configure ~/.claude.json (run configure-claude-json.sh)
3. Restart Polybar

The module auto-updates based on your Polybar configuration.
",
            paths.polybar_modules_dir().display()
        ),
    }
}
