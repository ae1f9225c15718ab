use crate::*;

/// Mounts a subtree of another source as if it were the whole thing.
///
/// `SubdirSource::new(source, "/assets").open("/img.png")` is exactly
/// `source.open("/assets/img.png")`. The prefix is glued on as-is, and the
/// wrapped source does the normalizing, so the prefix shouldn't end in `/`.
#[derive(Clone, Debug)]
pub struct SubdirSource<S> {
    inner: S,
    prefix: String,
}

impl<S> SubdirSource<S> {
    pub fn new(inner: S, prefix: impl Into<String>) -> SubdirSource<S> {
        SubdirSource { inner, prefix: prefix.into() }
    }
    pub fn prefix(&self) -> &str { &self.prefix }
    pub fn inner(&self) -> &S { &self.inner }
    pub fn into_inner(self) -> S { self.inner }
}

impl<S: AssetSource> AssetSource for SubdirSource<S> {
    fn open(&self, path: &str) -> Result<AssetFile, AssetError> {
        let full = format!("{}{}", self.prefix, path);
        log::trace!("{:?} -> {:?}", path, full);
        self.inner.open(&full)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testutil::*;
    #[test]
    fn same_as_full_path() {
        let (table, _) = sample_table();
        let source = EmbeddedSource::new(table);
        let dir = SubdirSource::new(source.clone(), "/assets");
        let a = dir.open("/img.png").unwrap();
        let b = source.open("/assets/img.png").unwrap();
        assert_eq!(a.info(), b.info());
        assert_eq!(a.into_bytes().unwrap(), b.into_bytes().unwrap());
        assert!(dir.open("/static/a.txt").unwrap_err().is_not_found());
    }
    #[test]
    fn nests() {
        let (table, _) = sample_table();
        let dir = SubdirSource::new(
            SubdirSource::new(EmbeddedSource::new(table), "/static"), "/..");
        // "/static" + "/.." + "/assets/img.png" cleans to "/assets/img.png"
        assert!(dir.open("/assets/img.png").is_ok());
        let dir = SubdirSource::new(dir.into_inner(), "");
        assert_eq!(dir.open("/a.txt").unwrap().into_bytes().unwrap(),
                   b"hello world");
    }
}
