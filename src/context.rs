//! The process-wide handle to the FNFT shared library.
//!
//! `FnftContext` wraps the resolved `libloading::Library`. It is created
//! once, treated as immutable, and passed by reference into every transform
//! call; there is no hidden global state. Resolution failures surface at
//! construction (first use), never at module load.
//!
//! # Thread safety
//!
//! The context itself is `Send + Sync` and lookups are read-only. Whether
//! concurrent *calls* into FNFT are safe depends on the C library being
//! reentrant; that is an external contract this layer documents but cannot
//! enforce.

use std::ffi::c_void;
use std::os::raw::c_char;
use std::path::{Path, PathBuf};

use libloading::{Library, Symbol};

use crate::error::{ensure_success, FnftError, Result};
use crate::types::{FnftInt, FnftUint};

/// Environment variable consulted by [`FnftContext::from_env`].
pub const LIBRARY_ENV_VAR: &str = "FNFT_LIBRARY";

/// Maximum length of the version suffix string, per `fnft_config.h`.
const VERSION_SUFFIX_MAXLEN: usize = 8;

type VersionFn = unsafe extern "C" fn(
    major: *mut FnftUint,
    minor: *mut FnftUint,
    patch: *mut FnftUint,
    suffix: *mut c_char,
) -> FnftInt;

type SetPrintfFn = unsafe extern "C" fn(printf: *const c_void);

/// A loaded FNFT library.
pub struct FnftContext {
    library: Library,
    path: PathBuf,
}

impl FnftContext {
    /// Load the FNFT library from an explicit path.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let library = unsafe { Library::new(path) }.map_err(|e| FnftError::LoadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            library,
            path: path.to_path_buf(),
        })
    }

    /// Load the library from the `FNFT_LIBRARY` environment variable, or by
    /// the platform-specific name (`libfnft.so`, `libfnft.dylib`,
    /// `fnft.dll`) through the system loader's search path.
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = std::env::var(LIBRARY_ENV_VAR) {
            return Self::load(path);
        }
        let name = Self::platform_lib_name();
        Self::load(name).map_err(|_| FnftError::LibraryNotFound(name.to_string()))
    }

    /// Platform-specific library filename.
    fn platform_lib_name() -> &'static str {
        if cfg!(target_os = "windows") {
            "fnft.dll"
        } else if cfg!(target_os = "macos") {
            "libfnft.dylib"
        } else {
            "libfnft.so"
        }
    }

    /// Path or name the library was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve an entry point by name.
    ///
    /// # Safety
    ///
    /// The caller must ensure `T` matches the actual foreign signature; the
    /// variant modules pin one signature type per entry point.
    pub(crate) unsafe fn symbol<T>(&self, name: &'static str) -> Result<Symbol<'_, T>> {
        self.library
            .get(name.as_bytes())
            .map_err(|_| FnftError::SymbolNotFound {
                library: self.path.display().to_string(),
                symbol: name.to_string(),
            })
    }

    /// Query the version of the loaded library via `fnft_version`.
    ///
    /// This is a strict call site: a nonzero code leaves the out-params
    /// meaningless, so it maps to a hard error rather than a warning.
    pub fn version(&self) -> Result<FnftVersion> {
        let f = unsafe { self.symbol::<VersionFn>("fnft_version") }?;
        let mut major: FnftUint = 0;
        let mut minor: FnftUint = 0;
        let mut patch: FnftUint = 0;
        let mut suffix = [0 as c_char; VERSION_SUFFIX_MAXLEN];
        let code = unsafe { f(&mut major, &mut minor, &mut patch, suffix.as_mut_ptr()) };
        ensure_success("fnft_version", code)?;
        let nul = suffix.iter().position(|&c| c == 0).unwrap_or(suffix.len());
        let suffix: String = suffix[..nul].iter().map(|&c| c as u8 as char).collect();
        Ok(FnftVersion {
            major,
            minor,
            patch,
            suffix,
        })
    }

    /// Silence the C library's own error/warning printing by installing a
    /// null printf handler (`fnft_errwarn_setprintf(NULL)`).
    pub fn suppress_messages(&self) -> Result<()> {
        let f = unsafe { self.symbol::<SetPrintfFn>("fnft_errwarn_setprintf") }?;
        unsafe { f(std::ptr::null()) };
        Ok(())
    }
}

impl std::fmt::Debug for FnftContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnftContext")
            .field("path", &self.path)
            .finish()
    }
}

/// Version reported by `fnft_version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FnftVersion {
    pub major: usize,
    pub minor: usize,
    pub patch: usize,
    pub suffix: String,
}

impl std::fmt::Display for FnftVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}{}", self.major, self.minor, self.patch, self.suffix)
    }
}
