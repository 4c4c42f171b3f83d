use core::ffi::c_void;

use fave_cabi_types::{FaveEntryMakerV1, FaveLogLevel, FaveStatus, FaveStr, FaveStrSinkV1};
use fave_factory::DuplicatePolicy;
use tracing::{debug, info, warn};

use crate::EntryWarehouse;

/// Declarations collected during one entry-point call, committed only if the call succeeds.
pub(crate) struct Registrar<'a> {
	pub(crate) target: &'a EntryWarehouse,
	pub(crate) staged: Vec<(String, FaveEntryMakerV1)>,
	pub(crate) refused: Vec<String>,
}

impl<'a> Registrar<'a> {
	pub(crate) fn new(target: &'a EntryWarehouse) -> Self {
		Self {
			target,
			staged: Vec::new(),
			refused: Vec::new(),
		}
	}

	fn stage(&mut self, key: &str, maker: FaveEntryMakerV1) -> FaveStatus {
		let taken = self.target.factory().contains(key) || self.staged.iter().any(|(k, _)| k == key);
		if taken && self.target.factory().policy() == DuplicatePolicy::Reject {
			debug!(key, "plugin declaration refused");
			self.refused.push(key.to_string());
			return FaveStatus::Rejected;
		}
		self.staged.push((key.to_string(), maker));
		FaveStatus::Ok
	}
}

pub(crate) extern "C" fn host_declare(
	registrar: *mut c_void,
	key: FaveStr,
	maker: FaveEntryMakerV1,
) -> FaveStatus {
	if registrar.is_null() {
		return FaveStatus::Failed;
	}
	// SAFETY: `registrar` is the `Registrar` the host placed in `FaveHostV1` for this call.
	let registrar = unsafe { &mut *registrar.cast::<Registrar<'_>>() };
	// SAFETY: the guest passes a view valid for the duration of this call.
	match unsafe { key.as_str() } {
		Some(key) if !key.is_empty() => registrar.stage(key, maker),
		Some(_) => {
			warn!("plugin declared an empty key");
			FaveStatus::Failed
		}
		None => {
			warn!("plugin declared a key that is not UTF-8");
			FaveStatus::Failed
		}
	}
}

pub(crate) extern "C" fn host_log(level: FaveLogLevel, msg: FaveStr) {
	// SAFETY: the guest passes a view valid for the duration of this call.
	let msg = unsafe { msg.as_str() }.unwrap_or("<invalid utf-8>");
	match level {
		FaveLogLevel::Debug => debug!(target: "fave::plugin", "{msg}"),
		FaveLogLevel::Info => info!(target: "fave::plugin", "{msg}"),
		FaveLogLevel::Warn => warn!(target: "fave::plugin", "{msg}"),
	}
}

extern "C" fn append_to_string(ctx: *mut c_void, s: FaveStr) {
	// SAFETY: `ctx` comes from `string_sink` and the `String` outlives the sink's use.
	let out = unsafe { &mut *ctx.cast::<String>() };
	// SAFETY: the writer passes a view valid for the duration of this call.
	match unsafe { s.as_str() } {
		Some(s) => out.push_str(s),
		None => out.push(char::REPLACEMENT_CHARACTER),
	}
}

/// Sink appending to `out`. `out` must outlive every call made through the sink.
pub(crate) fn string_sink(out: &mut String) -> FaveStrSinkV1 {
	FaveStrSinkV1 {
		ctx: (out as *mut String).cast(),
		write: append_to_string,
	}
}
