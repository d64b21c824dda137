#[cfg(feature = "alloc")]
use alloc::{boxed::Box, vec};

/// Backing bytes of a [`TextBuffer`](crate::TextBuffer).
///
/// Ownership is carried by the variant: dropping or replacing a `Storage`
/// frees an owned allocation exactly once and never touches borrowed memory.
#[derive(Debug, Default)]
pub(crate) enum Storage<'a> {
    /// No bytes at all; every write is a no-op.
    #[default]
    Inert,
    /// Caller-supplied memory.
    Borrowed(&'a mut [u8]),
    /// Memory allocated by the buffer itself.
    #[cfg(feature = "alloc")]
    Owned(Box<[u8]>),
}

impl<'a> Storage<'a> {
    /// Binds `size` bytes: a prefix of `buffer` when one is given (clamped to
    /// its length), otherwise a fresh zeroed allocation.
    ///
    /// Without the `alloc` feature a missing buffer yields [`Storage::Inert`].
    pub(crate) fn bind(buffer: Option<&'a mut [u8]>, size: usize) -> Self {
        match buffer {
            Some(buffer) => {
                let size = size.min(buffer.len());
                if size == 0 {
                    return Storage::Inert;
                }
                let (head, _) = buffer.split_at_mut(size);
                Storage::Borrowed(head)
            }
            None if size == 0 => Storage::Inert,
            #[cfg(feature = "alloc")]
            None => {
                #[cfg(feature = "log")]
                log::trace!("allocating {size} byte text buffer");
                Storage::Owned(vec![0; size].into_boxed_slice())
            }
            #[cfg(not(feature = "alloc"))]
            None => Storage::Inert,
        }
    }

    pub(crate) fn bytes(&self) -> &[u8] {
        match self {
            Storage::Inert => &[],
            Storage::Borrowed(bytes) => bytes,
            #[cfg(feature = "alloc")]
            Storage::Owned(bytes) => bytes,
        }
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        match self {
            Storage::Inert => &mut [],
            Storage::Borrowed(bytes) => bytes,
            #[cfg(feature = "alloc")]
            Storage::Owned(bytes) => bytes,
        }
    }

    pub(crate) fn is_owned(&self) -> bool {
        match self {
            Storage::Inert | Storage::Borrowed(_) => false,
            #[cfg(feature = "alloc")]
            Storage::Owned(_) => true,
        }
    }
}

#[cfg(all(feature = "log", feature = "alloc"))]
impl Drop for Storage<'_> {
    fn drop(&mut self) {
        if let Storage::Owned(bytes) = self {
            log::trace!("releasing {} byte text buffer", bytes.len());
        }
    }
}
