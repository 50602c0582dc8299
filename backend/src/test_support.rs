//! Test utilities for the backend crate.
//!
//! Shared by unit tests in `src/` and, through the `test-support` feature, by
//! the integration tests in `tests/`.

pub mod multipart {
    //! Hand-built `multipart/form-data` bodies.

    /// Boundary used by [`body`].
    pub const BOUNDARY: &str = "lens-test-boundary";

    /// A multipart part.
    pub enum Part<'a> {
        /// A text field: name and value.
        Text(&'a str, &'a str),
        /// A file field: name, filename and bytes.
        File(&'a str, &'a str, &'a [u8]),
        /// Shorthand for a JPEG in the `image` field.
        Image(&'a [u8]),
    }

    /// Content type header value for [`body`].
    pub fn content_type() -> String {
        format!("multipart/form-data; boundary={BOUNDARY}")
    }

    fn file_header(name: &str, filename: &str) -> String {
        format!(
            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
             Content-Type: image/jpeg\r\n\r\n"
        )
    }

    /// Encode `parts` as a multipart body.
    pub fn body(parts: &[Part<'_>]) -> Vec<u8> {
        let mut out = Vec::new();
        for part in parts {
            out.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(name, value) => {
                    out.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                            .as_bytes(),
                    );
                    out.extend_from_slice(value.as_bytes());
                }
                Part::File(name, filename, bytes) => {
                    out.extend_from_slice(file_header(name, filename).as_bytes());
                    out.extend_from_slice(bytes);
                }
                Part::Image(bytes) => {
                    out.extend_from_slice(file_header("image", "capture.jpg").as_bytes());
                    out.extend_from_slice(bytes);
                }
            }
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        out
    }
}
