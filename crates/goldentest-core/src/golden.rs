//! The golden handle.
//!
//! A [`Golden`] binds one reference file to an encoder, an output format, a
//! set of ignored field paths and optional hooks. It is a plain value:
//! configuration calls return a modified copy and leave the original intact.
//!
//! ```no_run
//! use goldentest_core::Golden;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct Report {
//!     name: String,
//!     generated_at: u64,
//! }
//!
//! let golden = Golden::<Report>::new("testdata/report.golden.json")
//!     .with_ignore_fields(["generated_at"]);
//! let fresh = Report { name: "weekly".into(), generated_at: 1 };
//! let outcome = golden.compare(fresh).expect("golden readable");
//! assert!(outcome.is_ok(), "{}", outcome.diff);
//! ```

use crate::diff::{compute_diff, render_report, IgnoreSet};
use crate::encoder::{Encoder, JsonEncoder, Shape};
use crate::errors::{codec_error, count_mismatch, io_error, unreadable_encoding, Result};
use crate::mode::GoldenMode;
use crate::outcome::{BatchOutcome, BatchResult, CompareError, CompareOutcome, CompareResult};
use crate::{log_op_end, log_op_error, log_op_start};
use goldentest_core_types::schema::{OP_COMPARE, OP_COMPARE_VALUES, OP_UPDATE, OP_UPDATE_VALUES};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Permission bits used when no mode was configured.
pub const DEFAULT_WRITE_MODE: u32 = 0o777;

/// Hook called with `(reference, fresh)` before a diff or a marshal.
pub type Hook<T> = Arc<dyn Fn(&mut T, &mut T) -> Result<()> + Send + Sync>;

/// Descriptor of one golden file for values of type `T`.
pub struct Golden<T> {
    path: PathBuf,
    packed: bool,
    encoder: Arc<dyn Encoder<T>>,
    write_mode: u32,
    ignore_fields: Vec<String>,
    before_compare: Option<Hook<T>>,
    before_update: Option<Hook<T>>,
    mode: GoldenMode,
}

impl<T> Clone for Golden<T> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            packed: self.packed,
            encoder: Arc::clone(&self.encoder),
            write_mode: self.write_mode,
            ignore_fields: self.ignore_fields.clone(),
            before_compare: self.before_compare.clone(),
            before_update: self.before_update.clone(),
            mode: self.mode,
        }
    }
}

impl<T> std::fmt::Debug for Golden<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Golden")
            .field("path", &self.path)
            .field("packed", &self.packed)
            .field("encoder", &self.encoder.name())
            .field("write_mode", &format_args!("{:o}", self.write_mode))
            .field("ignore_fields", &self.ignore_fields)
            .field("before_compare", &self.before_compare.is_some())
            .field("before_update", &self.before_update.is_some())
            .field("mode", &self.mode)
            .finish()
    }
}

impl<T> Golden<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Handle for a serde type, using the JSON encoder.
    ///
    /// The update/compare mode used by [`check`](Self::check) is read from
    /// `GOLDEN_UPDATE`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::new_with_encoder(path, JsonEncoder)
    }
}

impl<T> Golden<T> {
    /// Handle using an explicit encoder, for types without serde support
    /// such as schema messages.
    pub fn new_with_encoder<E>(path: impl Into<PathBuf>, encoder: E) -> Self
    where
        E: Encoder<T> + 'static,
    {
        Self {
            path: path.into(),
            packed: false,
            encoder: Arc::new(encoder),
            write_mode: DEFAULT_WRITE_MODE,
            ignore_fields: Vec::new(),
            before_compare: None,
            before_update: None,
            mode: GoldenMode::from_env(),
        }
    }

    // ---------- configuration ----------

    /// Replace the ignored dotted field paths.
    pub fn with_ignore_fields<I, S>(&self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut golden = self.clone();
        golden.ignore_fields = fields.into_iter().map(Into::into).collect();
        golden
    }

    /// Compact (`true`) or tab-indented (`false`) persisted output.
    pub fn with_packed_output(&self, packed: bool) -> Self {
        let mut golden = self.clone();
        golden.packed = packed;
        golden
    }

    /// Permission bits for newly created golden files. `0` means the default.
    pub fn with_write_file_mode(&self, mode: u32) -> Self {
        let mut golden = self.clone();
        golden.write_mode = mode;
        golden
    }

    /// Hook run with `(reference, value)` before an update is encoded.
    pub fn with_before_update<F>(&self, hook: F) -> Self
    where
        F: Fn(&mut T, &mut T) -> Result<()> + Send + Sync + 'static,
    {
        let mut golden = self.clone();
        golden.before_update = Some(Arc::new(hook));
        golden
    }

    /// Hook run with `(reference, fresh)` before the diff; an error vetoes the compare.
    pub fn with_before_compare<F>(&self, hook: F) -> Self
    where
        F: Fn(&mut T, &mut T) -> Result<()> + Send + Sync + 'static,
    {
        let mut golden = self.clone();
        golden.before_compare = Some(Arc::new(hook));
        golden
    }

    /// Swap the serialization strategy.
    pub fn with_encoder<E>(&self, encoder: E) -> Self
    where
        E: Encoder<T> + 'static,
    {
        let mut golden = self.clone();
        golden.encoder = Arc::new(encoder);
        golden
    }

    /// Override the mode used by [`check`](Self::check).
    pub fn with_mode(&self, mode: GoldenMode) -> Self {
        let mut golden = self.clone();
        golden.mode = mode;
        golden
    }

    // ---------- accessors ----------

    /// Location of the golden file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether persisted output is compact.
    pub fn is_packed(&self) -> bool {
        self.packed
    }

    /// Permission bits for new files, with `0` resolved to the default.
    pub fn write_mode(&self) -> u32 {
        if self.write_mode == 0 {
            DEFAULT_WRITE_MODE
        } else {
            self.write_mode
        }
    }

    /// Dotted field paths excluded from the diff.
    pub fn ignore_fields(&self) -> &[String] {
        &self.ignore_fields
    }

    /// Update or compare, as used by [`check`](Self::check).
    pub fn mode(&self) -> GoldenMode {
        self.mode
    }

    /// Name of the configured encoder.
    pub fn encoder_name(&self) -> &'static str {
        self.encoder.name()
    }

    // ---------- persistence ----------

    /// Write raw bytes to the golden file, creating parent directories and
    /// truncating any previous content.
    pub fn write_bytes(&self, data: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| io_error("create_golden_dir", parent, e))?;
        }

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(self.write_mode());
        }

        let mut file = options
            .open(&self.path)
            .map_err(|e| io_error("write_file", &self.path, e))?;
        file.write_all(data)
            .map_err(|e| io_error("write_file", &self.path, e))
    }

    fn read_bytes(&self) -> Result<Vec<u8>> {
        fs::read(&self.path).map_err(|e| io_error("read_file", &self.path, e))
    }

    /// Encode and make sure the bytes decode again before they are written.
    ///
    /// serde_json turns non-finite floats into `null`, which would leave a
    /// golden file no compare can read.
    fn marshal(&self, value: Shape<'_, T>) -> Result<Vec<u8>> {
        let data = self
            .encoder
            .marshal(value, self.packed)
            .map_err(|e| codec_error("marshal", &self.path, e))?;
        let decoded = match value {
            Shape::One(_) => self.encoder.unmarshal_one(&data).map(drop),
            Shape::Many(_) => self.encoder.unmarshal_many(&data).map(drop),
        };
        decoded.map_err(|e| unreadable_encoding(&self.path, e))?;
        Ok(data)
    }

    // ---------- comparison ----------

    fn diff(&self, reference: &T, fresh: &T) -> Result<String> {
        let want = self
            .encoder
            .view(reference)
            .map_err(|e| codec_error("view", &self.path, e))?;
        let got = self
            .encoder
            .view(fresh)
            .map_err(|e| codec_error("view", &self.path, e))?;
        let ignore = IgnoreSet::new(&self.ignore_fields);
        for ignore_path in ignore.unmatched(&want, &got) {
            tracing::warn!(
                component = module_path!(),
                path = %self.path.display(),
                ignore_path = %ignore_path,
                "ignore path matches no field"
            );
        }
        Ok(render_report(&compute_diff(&want, &got, &ignore)))
    }

    /// Hook, then diff. Shared by the single and batch compares.
    fn compare_pair(&self, mut reference: T, mut fresh: T) -> CompareResult<T> {
        if let Some(hook) = &self.before_compare {
            if let Err(err) = hook(&mut reference, &mut fresh) {
                let partial = CompareOutcome::new(reference, fresh, String::new());
                return Err(CompareError::new(Some(partial), err));
            }
        }

        match self.diff(&reference, &fresh) {
            Ok(diff) => Ok(CompareOutcome::new(reference, fresh, diff)),
            Err(err) => {
                let partial = CompareOutcome::new(reference, fresh, String::new());
                Err(CompareError::new(Some(partial), err))
            }
        }
    }

    fn compare_inner(&self, fresh: T) -> CompareResult<T> {
        let data = self.read_bytes()?;
        let reference = self
            .encoder
            .unmarshal_one(&data)
            .map_err(|e| codec_error("unmarshal_golden", &self.path, e))?;
        self.compare_pair(reference, fresh)
    }

    fn compare_values_inner(&self, fresh: Vec<T>) -> BatchResult<T> {
        let data = self.read_bytes()?;
        let references = self
            .encoder
            .unmarshal_many(&data)
            .map_err(|e| codec_error("unmarshal_golden_values", &self.path, e))?;

        if references.len() != fresh.len() {
            return Err(count_mismatch(&self.path, references.len(), fresh.len()).into());
        }

        let mut outcomes = BatchOutcome::new();
        for (index, (reference, fresh)) in references.into_iter().zip(fresh).enumerate() {
            match self.compare_pair(reference, fresh) {
                Ok(outcome) if outcome.is_ok() => {}
                Ok(outcome) => {
                    outcomes.insert(index, outcome);
                }
                Err(err) => return Err(CompareError::new(outcomes, err.into_error())),
            }
        }
        Ok(outcomes)
    }

    /// Compare a fresh value against the stored reference.
    ///
    /// # Errors
    ///
    /// - `Io`: the golden file cannot be read
    /// - `Decode`: the stored bytes do not decode into `T`
    /// - any error returned by the `before_compare` hook, unchanged; the
    ///   partial outcome then carries both values and an empty diff
    pub fn compare(&self, fresh: T) -> CompareResult<T> {
        let started = Instant::now();
        log_op_start!(
            OP_COMPARE,
            path = %self.path.display(),
            encoder = self.encoder.name()
        );

        let result = self.compare_inner(fresh);
        let duration_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(outcome) => {
                log_op_end!(
                    OP_COMPARE,
                    duration_ms = duration_ms,
                    path = %self.path.display(),
                    diff_len = outcome.diff.len() as u64
                );
            }
            Err(err) => {
                log_op_error!(
                    OP_COMPARE,
                    err.error(),
                    duration_ms = duration_ms,
                    path = %self.path.display()
                );
            }
        }
        result
    }

    /// Compare a fresh batch against the stored reference batch, position by
    /// position. Only differing positions appear in the result.
    ///
    /// # Errors
    ///
    /// - `Io` / `Decode` as for [`compare`](Self::compare)
    /// - `CountMismatch`: the batches differ in length; nothing is compared
    /// - any hook error, unchanged, with the differing positions found so far
    pub fn compare_values(&self, fresh: Vec<T>) -> BatchResult<T> {
        let started = Instant::now();
        log_op_start!(
            OP_COMPARE_VALUES,
            path = %self.path.display(),
            encoder = self.encoder.name(),
            items = fresh.len() as u64
        );

        let result = self.compare_values_inner(fresh);
        let duration_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(outcomes) => {
                log_op_end!(
                    OP_COMPARE_VALUES,
                    duration_ms = duration_ms,
                    path = %self.path.display(),
                    differing = outcomes.len() as u64
                );
            }
            Err(err) => {
                log_op_error!(
                    OP_COMPARE_VALUES,
                    err.error(),
                    duration_ms = duration_ms,
                    path = %self.path.display()
                );
            }
        }
        result
    }
}

impl<T> Golden<T>
where
    T: Clone,
{
    /// Best-effort read of the current reference, for the update hook.
    fn existing_reference(&self) -> Option<T> {
        let data = fs::read(&self.path).ok()?;
        self.encoder.unmarshal_one(&data).ok()
    }

    fn existing_references(&self) -> Option<Vec<T>> {
        let data = fs::read(&self.path).ok()?;
        self.encoder.unmarshal_many(&data).ok()
    }

    /// Run the update hook and persist; returns the value actually written.
    fn persist_one(&self, mut value: T) -> Result<T> {
        if let Some(hook) = &self.before_update {
            let mut reference = self
                .existing_reference()
                .unwrap_or_else(|| value.clone());
            hook(&mut reference, &mut value)?;
        }
        let data = self.marshal(Shape::One(&value))?;
        self.write_bytes(&data)?;
        Ok(value)
    }

    fn persist_many(&self, mut values: Vec<T>) -> Result<Vec<T>> {
        if let Some(hook) = &self.before_update {
            let mut existing = self.existing_references().unwrap_or_default().into_iter();
            for value in values.iter_mut() {
                let mut reference = existing.next().unwrap_or_else(|| value.clone());
                hook(&mut reference, value)?;
            }
        }
        let data = self.marshal(Shape::Many(&values))?;
        self.write_bytes(&data)?;
        Ok(values)
    }

    fn logged<R>(&self, op: &'static str, items: usize, run: impl FnOnce() -> Result<R>) -> Result<R> {
        let started = Instant::now();
        log_op_start!(
            op,
            path = %self.path.display(),
            encoder = self.encoder.name(),
            packed = self.packed,
            items = items as u64
        );

        let result = run();
        let duration_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => {
                log_op_end!(op, duration_ms = duration_ms, path = %self.path.display());
            }
            Err(err) => {
                log_op_error!(op, err, duration_ms = duration_ms, path = %self.path.display());
            }
        }
        result
    }

    /// Serialize `value` and overwrite the golden file with it.
    ///
    /// The `before_update` hook receives the current reference (or a copy of
    /// `value` when there is none) and may normalize `value` before it is
    /// written.
    ///
    /// # Errors
    ///
    /// - any error returned by the `before_update` hook, unchanged
    /// - `Encode` (or a shape kind): the encoder rejected the value
    /// - `Io`: the file could not be written
    pub fn update(&self, value: T) -> Result<()> {
        self.logged(OP_UPDATE, 1, || self.persist_one(value).map(|_| ()))
    }

    /// Serialize the whole batch as one document and overwrite the golden file.
    ///
    /// # Errors
    ///
    /// Same as [`update`](Self::update).
    pub fn update_values(&self, values: Vec<T>) -> Result<()> {
        let items = values.len();
        self.logged(OP_UPDATE_VALUES, items, || {
            self.persist_many(values).map(|_| ())
        })
    }

    /// Compare, or refresh the reference when the handle is in update mode.
    ///
    /// In update mode the outcome's `reference` is the value that was written
    /// and its diff is empty.
    pub fn check(&self, fresh: T) -> CompareResult<T> {
        match self.mode {
            GoldenMode::Compare => self.compare(fresh),
            GoldenMode::Update => {
                let written = self.logged(OP_UPDATE, 1, || self.persist_one(fresh.clone()))?;
                Ok(CompareOutcome::new(written, fresh, String::new()))
            }
        }
    }

    /// Batch form of [`check`](Self::check). In update mode the result is
    /// always an empty map.
    pub fn check_values(&self, fresh: Vec<T>) -> BatchResult<T> {
        match self.mode {
            GoldenMode::Compare => self.compare_values(fresh),
            GoldenMode::Update => {
                let items = fresh.len();
                self.logged(OP_UPDATE_VALUES, items, || self.persist_many(fresh))?;
                Ok(BatchOutcome::new())
            }
        }
    }
}
