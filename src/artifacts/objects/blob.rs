//! Blob object
//!
//! A blob is the snapshot of one working file: its name and its bytes. The
//! name is part of the identity, so two files with equal content but different
//! names are stored as distinct blobs.
//!
//! ## Format
//!
//! On disk: `blob <size>\0<name>\0<content>`

use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    /// File name relative to the working directory
    name: String,
    /// Raw file content
    content: Bytes,
}

impl Blob {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut payload = Vec::with_capacity(self.name.len() + 1 + self.content.len());
        payload.extend_from_slice(self.name.as_bytes());
        payload.push(b'\0');
        payload.extend_from_slice(&self.content);

        Ok(frame(self.object_type(), &payload))
    }
}

impl Unpackable for Blob {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        // the header has already been read
        let mut name = Vec::new();
        reader.read_until(b'\0', &mut name)?;
        if name.pop() != Some(b'\0') {
            anyhow::bail!("Invalid blob object: missing name terminator");
        }
        let name = String::from_utf8(name).context("Invalid blob object: name is not UTF-8")?;

        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;

        Ok(Self::new(name, Bytes::from(content)))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }
}
