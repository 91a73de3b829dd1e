use windows::Win32::{
    Foundation::{HANDLE, HGLOBAL},
    System::{
        DataExchange::{
            CloseClipboard, EmptyClipboard, GetClipboardData, GetClipboardSequenceNumber,
            OpenClipboard, SetClipboardData,
        },
        Memory::{GMEM_MOVEABLE, GlobalAlloc, GlobalFree, GlobalLock, GlobalSize, GlobalUnlock},
    },
};

use crate::domain::Failure;

/// Win32 clipboard format id for UTF 16 text (`CF_UNICODETEXT`).
const CF_UNICODETEXT_ID: u32 = 13;

/// RAII guard that opens the process clipboard on creation and closes it on drop.
struct ClipboardGuard;

impl ClipboardGuard {
    /// `None` when another process holds the clipboard open.
    fn open() -> Option<Self> {
        unsafe { OpenClipboard(None).ok()? };
        Some(Self)
    }
}

impl Drop for ClipboardGuard {
    fn drop(&mut self) {
        unsafe {
            let _ = CloseClipboard();
        }
    }
}

/// Owns a global allocation until the clipboard takes it over.
struct GlobalMem {
    handle: HGLOBAL,
    owned: bool,
}

impl GlobalMem {
    fn new(handle: HGLOBAL) -> Self {
        Self {
            handle,
            owned: true,
        }
    }

    fn disarm(&mut self) {
        self.owned = false;
    }
}

impl Drop for GlobalMem {
    fn drop(&mut self) {
        if self.owned && !self.handle.0.is_null() {
            unsafe {
                let _ = GlobalFree(self.handle);
            }
        }
    }
}

pub fn sequence_number() -> u64 {
    u64::from(unsafe { GetClipboardSequenceNumber() })
}

/// Reads `CF_UNICODETEXT`, scanning at most the allocation size for the NUL terminator.
pub fn get_text() -> Option<String> {
    let _clip = ClipboardGuard::open()?;

    unsafe {
        let handle = GetClipboardData(CF_UNICODETEXT_ID).ok()?;
        if handle.0.is_null() {
            return None;
        }

        let hglobal = HGLOBAL(handle.0);
        let max_units = GlobalSize(hglobal) / std::mem::size_of::<u16>();
        if max_units == 0 {
            return None;
        }

        let ptr = GlobalLock(hglobal) as *const u16;
        if ptr.is_null() {
            return None;
        }

        let mut len = 0usize;
        while len < max_units && *ptr.add(len) != 0 {
            len += 1;
        }

        let text = String::from_utf16_lossy(std::slice::from_raw_parts(ptr, len));
        let _ = GlobalUnlock(hglobal);
        Some(text)
    }
}

pub fn clear() -> Result<(), Failure> {
    let _clip = ClipboardGuard::open().ok_or(Failure::Clipboard)?;
    unsafe { EmptyClipboard() }.map_err(|_| Failure::Clipboard)
}

pub fn set_text(text: &str) -> Result<(), Failure> {
    let units: Vec<u16> = text.encode_utf16().chain(std::iter::once(0)).collect();
    let bytes = units.len() * std::mem::size_of::<u16>();

    let _clip = ClipboardGuard::open().ok_or(Failure::Clipboard)?;

    unsafe {
        EmptyClipboard().map_err(|_| Failure::Clipboard)?;

        let hglobal = GlobalAlloc(GMEM_MOVEABLE, bytes).map_err(|_| Failure::Clipboard)?;
        let mut mem = GlobalMem::new(hglobal);

        let ptr = GlobalLock(hglobal) as *mut u16;
        if ptr.is_null() {
            return Err(Failure::Clipboard);
        }
        std::ptr::copy_nonoverlapping(units.as_ptr(), ptr, units.len());
        let _ = GlobalUnlock(hglobal);

        SetClipboardData(CF_UNICODETEXT_ID, Some(HANDLE(hglobal.0)))
            .map_err(|_| Failure::Clipboard)?;
        mem.disarm();
    }

    Ok(())
}
