//! Filesystem adapter that hides dangling symlinks.
//!
//! `LocalFs` reports a broken symlink as an entry whose metadata lookup fails
//! with `NotFound`, which aborts PROPFIND walks and listings. This wrapper
//! drops such entries while enumerating and delegates everything else.

use dav_server::davpath::DavPath;
use dav_server::fs::{
    DavDirEntry, DavFile, DavFileSystem, DavMetaData, FsError, FsFuture, FsStream, OpenOptions,
    ReadDirMeta,
};
use futures::StreamExt;
use log::{debug, trace};

/// `DavFileSystem` wrapper that skips children whose target is missing.
#[derive(Clone)]
pub struct SkipBrokenLinks<F> {
    inner: F,
}

impl<F> SkipBrokenLinks<F> {
    /// Wrap a filesystem.
    pub fn new(inner: F) -> Self {
        Self { inner }
    }
}

impl<F: DavFileSystem + Clone + Send + Sync> DavFileSystem for SkipBrokenLinks<F> {
    fn open<'a>(&'a self, path: &'a DavPath, options: OpenOptions) -> FsFuture<'a, Box<dyn DavFile>> {
        self.inner.open(path, options)
    }

    fn read_dir<'a>(
        &'a self,
        path: &'a DavPath,
        meta: ReadDirMeta,
    ) -> FsFuture<'a, FsStream<Box<dyn DavDirEntry>>> {
        trace!("read_dir({:?}, {:?})", path, meta);

        Box::pin(async move {
            let entries = self.inner.read_dir(path, meta).await?;
            let entries = entries.filter_map(|item| async move {
                match item {
                    Ok(entry) => {
                        if matches!(entry.metadata().await, Err(FsError::NotFound)) {
                            debug!(
                                "Skipping broken link {:?}",
                                String::from_utf8_lossy(&entry.name())
                            );
                            None
                        } else {
                            Some(Ok(entry))
                        }
                    }
                    Err(e) => Some(Err(e)),
                }
            });
            Ok(Box::pin(entries) as FsStream<Box<dyn DavDirEntry>>)
        })
    }

    fn metadata<'a>(&'a self, path: &'a DavPath) -> FsFuture<'a, Box<dyn DavMetaData>> {
        self.inner.metadata(path)
    }

    fn symlink_metadata<'a>(&'a self, path: &'a DavPath) -> FsFuture<'a, Box<dyn DavMetaData>> {
        self.inner.symlink_metadata(path)
    }

    fn create_dir<'a>(&'a self, path: &'a DavPath) -> FsFuture<'a, ()> {
        self.inner.create_dir(path)
    }

    fn remove_dir<'a>(&'a self, path: &'a DavPath) -> FsFuture<'a, ()> {
        self.inner.remove_dir(path)
    }

    fn remove_file<'a>(&'a self, path: &'a DavPath) -> FsFuture<'a, ()> {
        self.inner.remove_file(path)
    }

    fn rename<'a>(&'a self, from: &'a DavPath, to: &'a DavPath) -> FsFuture<'a, ()> {
        self.inner.rename(from, to)
    }

    fn copy<'a>(&'a self, from: &'a DavPath, to: &'a DavPath) -> FsFuture<'a, ()> {
        self.inner.copy(from, to)
    }
}
