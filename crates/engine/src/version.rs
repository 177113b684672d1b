use hyprbars_core::{BarsError, Result};

/// Oldest compositor release the bars are built against.
pub const MIN_HYPRLAND_VERSION: (u32, u32, u32) = (0, 40, 0);

/// Check the version string reported by the compositor.
///
/// Accepts tags such as `v0.45.2`, `0.45.2-31-gdeadbee` or `0.41`; anything
/// that doesn't start with a numeric version is treated as a mismatch.
pub fn check_version(found: &str) -> Result<()> {
    let mismatch = || BarsError::VersionMismatch {
        required: format_version(MIN_HYPRLAND_VERSION),
        found:    found.trim().to_string(),
    };

    let version = parse_version(found).ok_or_else(mismatch)?;
    if version < MIN_HYPRLAND_VERSION {
        return Err(mismatch());
    }
    Ok(())
}

fn parse_version(raw: &str) -> Option<(u32, u32, u32)> {
    let raw = raw.trim();
    let raw = raw.strip_prefix('v').unwrap_or(raw);
    let core = raw.split(['-', '+', ' ']).next()?;

    let mut parts = core.split('.').map(str::parse::<u32>);
    let major = parts.next()?.ok()?;
    let minor = parts.next()?.ok()?;
    let patch = match parts.next() {
        Some(p) => p.ok()?,
        None => 0,
    };
    Some((major, minor, patch))
}

fn format_version((major, minor, patch): (u32, u32, u32)) -> String {
    format!("{major}.{minor}.{patch}")
}
