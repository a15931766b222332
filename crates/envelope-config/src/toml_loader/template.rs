//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# Invitation Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[reveal]
# settle_delay_ms = 300     # 0-10000, open -> card visible
# collapse_delay_ms = 1000  # 0-10000, close -> envelope hidden

[audio]
# fade_step = 0.05          # volume removed per tick, (0.0, 1.0]
# fade_tick_ms = 50         # 1-1000
# start_volume = 1.0        # 0.0-1.0
# probe_timeout_secs = 10   # 1-120
# looping = true            # replay the track when it ends
# sources = [               # tried in order until one answers
#   "https://cdn.jsdelivr.net/gh/skype8067-afk/muixcsaqwwd@main/audio/music.mp3",
#   "https://files.freemusicarchive.org/storage-freemusicarchive-org/music/no_curator/Kevin_MacLeod/Classical_Sampler/Kevin_MacLeod_-_Gymnopedie_No_1.mp3",
# ]

[particles]
# count = 75                # 1-1000
# spread = 600.0            # offsets fall in [-spread/2, spread/2)
# max_delay_ms = 300        # 0-10000
# palette = ["#FFFFFF", "#FFD700", "#ADD8E6", "#E6E6FA"]

[tracking]
# enabled = true
# endpoint = "https://script.google.com/macros/s/.../exec"
# event_name = "Envelope Opened"
# flag_key = "invitationClicked"
# timeout_secs = 10         # 1-120

[toast]
# duration_ms = 5000        # 100-60000
# success_message = "Response has been recorded. Thank you!"
# error_message = "Could not record visit. A client-side error occurred."

[logging]
# level = "info"            # debug, info, warning, error
"##
}
