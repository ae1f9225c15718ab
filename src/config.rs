use std::{
    env,
    ffi::OsString,
    path::PathBuf as StdPathBuf,
};

/// How an [`Assets`](struct.Assets.html) facade is set up.
///
/// The usual arrangement is a release build that never touches the
/// environment (embedded mode, the default), and a development setup that
/// flips `use_local` via [`from_env`](#method.from_env).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetsConfig {
    /// Serve from disk instead of from the embedded table.
    pub use_local: bool,
    /// Directory that local mode serves from.
    pub local_root: StdPathBuf,
    /// In local mode, only serve paths that exist in the table, from the
    /// location each record was packed from.
    pub resolve_through_table: bool,
}

impl Default for AssetsConfig {
    fn default() -> AssetsConfig {
        AssetsConfig {
            use_local: false,
            local_root: StdPathBuf::from("."),
            resolve_through_table: false,
        }
    }
}

impl AssetsConfig {
    pub fn with_local(mut self, use_local: bool) -> AssetsConfig {
        self.use_local = use_local;
        self
    }
    pub fn with_local_root(mut self, root: impl Into<StdPathBuf>)
        -> AssetsConfig {
        self.local_root = root.into();
        self
    }
    pub fn with_table_resolution(mut self, via_table: bool) -> AssetsConfig {
        self.resolve_through_table = via_table;
        self
    }
    /// Starts from the defaults and applies any of these environment
    /// variables that are set:
    ///
    /// - `<PREFIX>_USE_LOCAL`: `1`, `true`, `yes` or `on` for local mode;
    ///   `0`, `false`, `no` or `off` for embedded mode
    /// - `<PREFIX>_LOCAL_ROOT`: directory for local mode
    /// - `<PREFIX>_LOCAL_VIA_TABLE`: same values as `_USE_LOCAL`
    ///
    /// Unparsable values are logged and ignored. The root is taken as-is,
    /// even if it isn't valid Unicode.
    pub fn from_env(prefix: &str) -> AssetsConfig {
        AssetsConfig::from_lookup(prefix, |name| env::var_os(name))
    }
    fn from_lookup<F>(prefix: &str, lookup: F) -> AssetsConfig
    where F: Fn(&str) -> Option<OsString> {
        let mut ret = AssetsConfig::default();
        let flag = |suffix: &str| -> Option<bool> {
            let name = format!("{}_{}", prefix, suffix);
            let value = match lookup(&name)?.into_string() {
                Ok(x) => x,
                Err(x) => {
                    log::warn!("ignoring {}={:?}: not valid UTF-8", name, x);
                    return None
                },
            };
            match parse_flag(&value) {
                Some(x) => Some(x),
                None => {
                    log::warn!("ignoring {}={:?}: not a boolean", name,
                               value);
                    None
                },
            }
        };
        if let Some(x) = flag("USE_LOCAL") {
            ret.use_local = x;
        }
        if let Some(x) = flag("LOCAL_VIA_TABLE") {
            ret.resolve_through_table = x;
        }
        if let Some(x) = lookup(&format!("{}_LOCAL_ROOT", prefix)) {
            ret.local_root = StdPathBuf::from(x);
        }
        log::info!("assets: {} mode, local root {:?}",
                   if ret.use_local { "local" } else { "embedded" },
                   ret.local_root);
        ret
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;
    fn lookup_in(vars: &[(&str, &str)])
        -> impl Fn(&str) -> Option<OsString> {
        let vars: HashMap<String, OsString> = vars.iter()
            .map(|(k, v)| (k.to_string(), OsString::from(*v))).collect();
        move |name: &str| vars.get(name).cloned()
    }
    #[test]
    fn defaults() {
        let config = AssetsConfig::from_lookup("APP", lookup_in(&[]));
        assert_eq!(config, AssetsConfig::default());
        assert!(!config.use_local);
    }
    #[test]
    fn everything_set() {
        let config = AssetsConfig::from_lookup("APP", lookup_in(&[
            ("APP_USE_LOCAL", "Yes"),
            ("APP_LOCAL_ROOT", "/srv/app/static"),
            ("APP_LOCAL_VIA_TABLE", "1"),
            ("OTHER_USE_LOCAL", "0"),
        ]));
        assert_eq!(config, AssetsConfig::default()
                   .with_local(true)
                   .with_local_root("/srv/app/static")
                   .with_table_resolution(true));
    }
    #[test]
    fn garbage_is_ignored() {
        let config = AssetsConfig::from_lookup("APP", lookup_in(&[
            ("APP_USE_LOCAL", "perhaps"),
        ]));
        assert!(!config.use_local);
    }
    #[test]
    fn flags() {
        for (value, result) in [("1", Some(true)), (" ON ", Some(true)),
                                ("off", Some(false)), ("", Some(false)),
                                ("2", None)] {
            assert_eq!(parse_flag(value), result, "{:?}", value);
        }
    }
    #[cfg(unix)]
    #[test]
    fn non_unicode_values() {
        use std::os::unix::ffi::OsStringExt;
        let root = OsString::from_vec(b"/srv/caf\xe9".to_vec());
        let vars: HashMap<&str, OsString> = [
            ("APP_USE_LOCAL", OsString::from_vec(b"\xff1".to_vec())),
            ("APP_LOCAL_VIA_TABLE", OsString::from("on")),
            ("APP_LOCAL_ROOT", root.clone()),
        ].into_iter().collect();
        let config = AssetsConfig::from_lookup("APP", |name: &str| {
            vars.get(name).cloned()
        });
        assert!(!config.use_local);
        assert!(config.resolve_through_table);
        assert_eq!(config.local_root, StdPathBuf::from(root));
    }
}
