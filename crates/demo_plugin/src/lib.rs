//! Example C-ABI plugin contributing `Atlas` and `Journal` library entries.

use core::ffi::c_void;
use std::mem::size_of;

use fave_cabi_types::{
	FAVE_C_ABI_VERSION, FaveEntryArgsV1, FaveEntryMakerV1, FaveEntryObjectV1, FaveEntryVTableV1,
	FaveGuestV1, FaveHostV1, FaveLogLevel, FaveStatus, FaveStr, FaveStrSinkV1,
};

/// Name this plugin reports to the host.
pub const PLUGIN_NAME: &str = "fave-demo-plugin";

/// Keys and makers declared by [`fave_plugin_entry_v1`].
pub const ENTRIES: &[(&str, FaveEntryMakerV1)] = &[
	("Atlas", make_atlas as FaveEntryMakerV1),
	("Journal", make_journal as FaveEntryMakerV1),
];

struct Entry {
	title: &'static str,
	library: String,
}

static ENTRY_VTABLE: FaveEntryVTableV1 = FaveEntryVTableV1 {
	name: entry_name,
	drop: entry_drop,
};

extern "C" fn entry_name(data: *mut c_void, out: FaveStrSinkV1) {
	// SAFETY: `data` is the `Entry` boxed in `build`, not yet passed to `entry_drop`.
	let entry = unsafe { &*data.cast::<Entry>() };
	out.write_str(&format!("{} from {}", entry.title, entry.library));
}

extern "C" fn entry_drop(data: *mut c_void) {
	// SAFETY: the host calls `drop` exactly once per object built in `build`.
	drop(unsafe { Box::from_raw(data.cast::<Entry>()) });
}

fn build(title: &'static str, args: *const FaveEntryArgsV1, out: *mut FaveEntryObjectV1) -> FaveStatus {
	if args.is_null() || out.is_null() {
		return FaveStatus::Failed;
	}
	// SAFETY: checked non-null; the host keeps `args` alive for the call.
	let args = unsafe { &*args };
	// SAFETY: the library name view is valid for the duration of the call.
	let library = match unsafe { args.library_name.as_str() } {
		Some(name) if !name.trim().is_empty() => name.to_string(),
		Some(_) => {
			args.error.write_str("library name is empty");
			return FaveStatus::Failed;
		}
		None => {
			args.error.write_str("library name is not valid UTF-8");
			return FaveStatus::Failed;
		}
	};

	let data = Box::into_raw(Box::new(Entry { title, library }));
	// SAFETY: checked non-null above.
	unsafe {
		out.write(FaveEntryObjectV1 {
			data: data.cast(),
			vtable: &ENTRY_VTABLE,
		});
	}
	FaveStatus::Ok
}

extern "C" fn make_atlas(args: *const FaveEntryArgsV1, out: *mut FaveEntryObjectV1) -> FaveStatus {
	build("World Atlas", args, out)
}

extern "C" fn make_journal(args: *const FaveEntryArgsV1, out: *mut FaveEntryObjectV1) -> FaveStatus {
	build("Journal of Library Science", args, out)
}

fn log(host: &FaveHostV1, level: FaveLogLevel, msg: &str) {
	if let Some(log) = host.log {
		log(level, FaveStr::new(msg));
	}
}

#[unsafe(no_mangle)]
/// # Safety
/// `host` and `out_guest` must be valid for the duration of this call, and `host.registrar`
/// must be the value the host expects back in `declare`.
pub unsafe extern "C" fn fave_plugin_entry_v1(
	host: *const FaveHostV1,
	out_guest: *mut FaveGuestV1,
) -> FaveStatus {
	if host.is_null() || out_guest.is_null() {
		return FaveStatus::Failed;
	}

	// SAFETY: checked non-null.
	unsafe {
		out_guest.write(FaveGuestV1 {
			abi_version: FAVE_C_ABI_VERSION,
			name: FaveStr::new(PLUGIN_NAME),
		});
	}

	// SAFETY: checked non-null; the host keeps the table alive for the call.
	let host = unsafe { &*host };
	if host.abi_version != FAVE_C_ABI_VERSION || host.struct_size < size_of::<FaveHostV1>() {
		return FaveStatus::Incompatible;
	}

	log(host, FaveLogLevel::Debug, "declaring demo entries");
	for &(key, maker) in ENTRIES {
		match (host.declare)(host.registrar, FaveStr::new(key), maker) {
			FaveStatus::Ok => {}
			FaveStatus::Rejected => log(host, FaveLogLevel::Warn, &format!("host refused {key}")),
			_ => return FaveStatus::Failed,
		}
	}
	FaveStatus::Ok
}
