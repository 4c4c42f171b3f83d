//! C ABI between the fave host and library-entry plugins.
//!
//! A plugin exports [`FAVE_PLUGIN_ENTRY_SYMBOL`] with the [`FavePluginEntryV1`] signature.
//! The host calls it once with a [`FaveHostV1`] table; the plugin fills in a
//! [`FaveGuestV1`] and calls [`FaveHostV1::declare`] for each entry it provides.
//!
//! Strings cross the boundary only as borrowed [`FaveStr`] views. Whenever one side needs
//! text produced by the other, it passes a [`FaveStrSinkV1`] and copies what is written into
//! it, so neither side ever frees memory owned by the other allocator.

use core::ffi::c_void;

/// ABI version spoken by this crate.
pub const FAVE_C_ABI_VERSION: u32 = 1;

/// Default name of the entry point a plugin exports.
pub const FAVE_PLUGIN_ENTRY_SYMBOL: &str = "fave_plugin_entry_v1";

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaveStatus {
	Ok = 0,
	Failed = 1,
	/// ABI version or struct layout mismatch.
	Incompatible = 2,
	/// The host refused a declaration (duplicate key under a rejecting policy).
	Rejected = 3,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaveLogLevel {
	Debug = 0,
	Info = 1,
	Warn = 2,
}

/// Borrowed UTF-8 view, valid only for the duration of the call it is passed to.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct FaveStr {
	pub ptr: *const u8,
	pub len: usize,
}

impl FaveStr {
	pub const fn new(s: &str) -> Self {
		Self {
			ptr: s.as_ptr(),
			len: s.len(),
		}
	}

	pub const fn empty() -> Self {
		Self {
			ptr: core::ptr::null(),
			len: 0,
		}
	}

	/// Views the bytes as `&str`, or `None` if they are not valid UTF-8.
	///
	/// # Safety
	///
	/// `ptr` must be null (with `len == 0`) or point to `len` readable bytes that stay alive
	/// and unmodified for `'a`.
	pub unsafe fn as_str<'a>(&self) -> Option<&'a str> {
		if self.ptr.is_null() {
			return Some("");
		}
		let bytes = unsafe { core::slice::from_raw_parts(self.ptr, self.len) };
		core::str::from_utf8(bytes).ok()
	}
}

/// Receives text from the other side of the boundary.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct FaveStrSinkV1 {
	pub ctx: *mut c_void,
	pub write: extern "C" fn(ctx: *mut c_void, s: FaveStr),
}

impl FaveStrSinkV1 {
	pub fn write_str(&self, s: &str) {
		(self.write)(self.ctx, FaveStr::new(s));
	}
}

/// Constructor arguments passed to every entry maker.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct FaveEntryArgsV1 {
	pub library_name: FaveStr,
	/// Where a failing maker writes its reason before returning [`FaveStatus::Failed`].
	pub error: FaveStrSinkV1,
}

/// Operations on an entry object owned by the plugin.
#[repr(C)]
#[derive(Debug)]
pub struct FaveEntryVTableV1 {
	/// Writes the entry's display name into `out`.
	pub name: extern "C" fn(data: *mut c_void, out: FaveStrSinkV1),
	/// Releases the object. Called exactly once.
	pub drop: extern "C" fn(data: *mut c_void),
}

/// An entry object built by a plugin maker.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct FaveEntryObjectV1 {
	pub data: *mut c_void,
	/// Must point to a table that lives as long as the plugin is loaded.
	pub vtable: *const FaveEntryVTableV1,
}

/// Builds one entry object into `out`.
pub type FaveEntryMakerV1 =
	extern "C" fn(args: *const FaveEntryArgsV1, out: *mut FaveEntryObjectV1) -> FaveStatus;

/// Table the host passes to a plugin entry point.
#[repr(C)]
#[derive(Debug)]
pub struct FaveHostV1 {
	/// `size_of::<FaveHostV1>()` as compiled by the host.
	pub struct_size: usize,
	pub abi_version: u32,
	/// Opaque host state; pass back unchanged to `declare`.
	pub registrar: *mut c_void,
	/// Declares `maker` under `key`. `key` is copied before the call returns.
	pub declare:
		extern "C" fn(registrar: *mut c_void, key: FaveStr, maker: FaveEntryMakerV1) -> FaveStatus,
	pub log: Option<extern "C" fn(level: FaveLogLevel, msg: FaveStr)>,
}

/// Description the plugin fills in during its entry call.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct FaveGuestV1 {
	pub abi_version: u32,
	/// Static plugin name.
	pub name: FaveStr,
}

/// Signature of [`FAVE_PLUGIN_ENTRY_SYMBOL`].
pub type FavePluginEntryV1 =
	unsafe extern "C" fn(host: *const FaveHostV1, out_guest: *mut FaveGuestV1) -> FaveStatus;
