//! Pulling a build id out of SteamCMD's KeyValues text.

use regex::Regex;
use std::sync::OnceLock;

fn digits() -> &'static Regex {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    DIGITS.get_or_init(|| Regex::new(r"\d+").expect("digit regex is valid"))
}

/// From SteamCMD output or an app manifest, get the build id of the public branch.
///
/// When the text has no `branches` section (an `appmanifest_*.acf` file), the
/// first `buildid` line is used.
///
/// ```
/// use starrupture_server::installer::parse_buildid;
///
/// let app_info = r#"
///     "branches"
///     {
///         "public"
///         {
///             "buildid"       "20861441"
///             "timeupdated"   "1767002514"
///         }
///         "beta"
///         {
///             "buildid"       "20900012"
///         }
///     }
/// "#;
/// assert_eq!(parse_buildid(app_info).as_deref(), Some("20861441"));
///
/// let manifest = r#"
/// "AppState"
/// {
///     "appid"     "3809400"
///     "buildid"   "20861441"
/// "#;
/// assert_eq!(parse_buildid(manifest).as_deref(), Some("20861441"));
/// ```
pub fn parse_buildid(text: &str) -> Option<String> {
    let mut seen_branches = false;
    let mut seen_public = false;

    for line in text.lines().map(str::trim) {
        if line.contains("\"branches\"") {
            seen_branches = true;
        } else if line.contains("\"public\"") {
            // Depot manifests carry their own "public" keys ahead of "branches".
            seen_public |= seen_branches;
        } else if line.contains("\"buildid\"") && seen_branches == seen_public {
            return digits().find(line).map(|m| m.as_str().to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_depot_buildids_before_public_branch() {
        let text = r#"
            "depots"
            {
                "branches"
                {
                    "staging"
                    {
                        "buildid"   "111"
                    }
                    "public"
                    {
                        "buildid"   "222"
                    }
                }
            }
        "#;
        assert_eq!(parse_buildid(text).as_deref(), Some("222"));
    }

    #[test]
    fn test_ignores_public_depot_manifest_before_branches() {
        let text = r#"
            "depots"
            {
                "3809401"
                {
                    "manifests"
                    {
                        "public"
                        {
                            "gid"       "5521337866270418210"
                            "size"      "1940283392"
                        }
                    }
                }
                "branches"
                {
                    "experimental"
                    {
                        "buildid"   "111"
                    }
                    "public"
                    {
                        "buildid"   "222"
                    }
                }
            }
        "#;
        assert_eq!(parse_buildid(text).as_deref(), Some("222"));
    }

    #[test]
    fn test_no_buildid() {
        assert_eq!(parse_buildid("\"AppState\"\n{\n}\n"), None);
        assert_eq!(parse_buildid(""), None);
    }
}
