/*!
# IO utilities

Byte-level access to corpora, whatever they are stored in:

- [StreamSource] opens a stream over a file ([FileStreamSource]), an archive entry ([ZipEntryStreamSource]) or a buffer ([MemoryStreamSource]).
- [StreamContainer] groups named streams (a directory, a zip archive, a set of buffers).
- [reader] turns streams into rows.
!*/
mod archive;
mod container;
pub mod reader;
mod source;

pub use archive::{ZipArchiveHandle, ZipEntryStreamSource};
pub use container::{DirectoryContainer, MemoryContainer, StreamContainer, ZipContainer};
pub use source::{FileStreamSource, MemoryStreamSource, StreamSource, TextEncoding};
