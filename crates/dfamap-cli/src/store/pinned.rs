//! BPF map pinned in bpffs, written through the `bpf(2)` syscall.

use std::path::{Path, PathBuf};

use dfamap_compiler::{MapStore, StoreError};

#[cfg(target_os = "linux")]
pub use linux::PinnedMap;

#[cfg(not(target_os = "linux"))]
pub use unsupported::PinnedMap;

#[cfg(target_os = "linux")]
mod linux {
    use std::ffi::CString;
    use std::io;
    use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};
    use std::os::unix::ffi::OsStrExt;

    use super::*;

    const BPF_MAP_UPDATE_ELEM: libc::c_long = 2;
    const BPF_OBJ_GET: libc::c_long = 7;
    const BPF_OBJ_GET_INFO_BY_FD: libc::c_long = 15;

    /// Create a new element or update an existing one.
    const BPF_ANY: u64 = 0;

    // Attribute structs are read by the kernel, not by us.
    #[repr(C)]
    #[derive(Default)]
    #[allow(dead_code)]
    struct ObjGetAttr {
        pathname: u64,
        bpf_fd: u32,
        file_flags: u32,
    }

    #[repr(C)]
    #[derive(Default)]
    #[allow(dead_code)]
    struct MapElemAttr {
        map_fd: u32,
        pad: u32,
        key: u64,
        value: u64,
        flags: u64,
    }

    #[repr(C)]
    #[derive(Default)]
    #[allow(dead_code)]
    struct InfoByFdAttr {
        bpf_fd: u32,
        info_len: u32,
        info: u64,
    }

    /// Leading fields of `struct bpf_map_info`.
    #[repr(C)]
    #[derive(Default, Debug)]
    struct MapInfo {
        map_type: u32,
        id: u32,
        key_size: u32,
        value_size: u32,
        max_entries: u32,
        map_flags: u32,
    }

    /// # Safety
    ///
    /// `attr` must be the attribute struct the kernel expects for `cmd`, and
    /// every pointer stored in it must be valid for the call.
    unsafe fn bpf<T>(cmd: libc::c_long, attr: &mut T) -> io::Result<libc::c_long> {
        let ret = unsafe {
            libc::syscall(
                libc::SYS_bpf,
                cmd,
                attr as *mut T,
                std::mem::size_of::<T>() as libc::c_uint,
            )
        };
        if ret < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(ret)
    }

    /// Open handle on a pinned BPF map. The descriptor closes on drop.
    #[derive(Debug)]
    pub struct PinnedMap {
        fd: OwnedFd,
        path: PathBuf,
        key_size: usize,
        value_size: usize,
        max_entries: u32,
    }

    impl PinnedMap {
        /// Open the map pinned at `path` and read its key/value sizes.
        pub fn open(path: &Path) -> Result<Self, StoreError> {
            let pathname = CString::new(path.as_os_str().as_bytes())
                .map_err(|_| StoreError::Io(format!("path contains NUL: {}", path.display())))?;

            let mut attr = ObjGetAttr {
                pathname: pathname.as_ptr() as u64,
                ..Default::default()
            };
            // SAFETY: attr is BPF_OBJ_GET's layout, pathname outlives the call
            let raw = unsafe { bpf(BPF_OBJ_GET, &mut attr) }?;
            // SAFETY: BPF_OBJ_GET returns a fresh descriptor we now own
            let fd = unsafe { OwnedFd::from_raw_fd(raw as libc::c_int) };

            let mut info = MapInfo::default();
            let mut attr = InfoByFdAttr {
                bpf_fd: fd.as_raw_fd() as u32,
                info_len: std::mem::size_of::<MapInfo>() as u32,
                info: &mut info as *mut MapInfo as u64,
            };
            // SAFETY: attr is BPF_OBJ_GET_INFO_BY_FD's layout, info outlives the call
            unsafe { bpf(BPF_OBJ_GET_INFO_BY_FD, &mut attr) }?;

            tracing::debug!(
                path = %path.display(),
                id = info.id,
                map_type = info.map_type,
                map_flags = info.map_flags,
                key_size = info.key_size,
                value_size = info.value_size,
                max_entries = info.max_entries,
                "opened pinned map"
            );

            Ok(Self {
                fd,
                path: path.to_path_buf(),
                key_size: info.key_size as usize,
                value_size: info.value_size as usize,
                max_entries: info.max_entries,
            })
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        pub fn max_entries(&self) -> u32 {
            self.max_entries
        }
    }

    impl MapStore for PinnedMap {
        fn key_size(&self) -> usize {
            self.key_size
        }

        fn value_size(&self) -> usize {
            self.value_size
        }

        fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
            // the kernel reads exactly key_size/value_size bytes through these pointers
            if key.len() != self.key_size {
                return Err(StoreError::SizeMismatch {
                    what: "key",
                    expected: self.key_size,
                    actual: key.len(),
                });
            }
            if value.len() != self.value_size {
                return Err(StoreError::SizeMismatch {
                    what: "value",
                    expected: self.value_size,
                    actual: value.len(),
                });
            }

            let mut attr = MapElemAttr {
                map_fd: self.fd.as_raw_fd() as u32,
                key: key.as_ptr() as u64,
                value: value.as_ptr() as u64,
                flags: BPF_ANY,
                ..Default::default()
            };
            // SAFETY: attr is BPF_MAP_UPDATE_ELEM's layout, sizes checked above
            unsafe { bpf(BPF_MAP_UPDATE_ELEM, &mut attr) }?;
            Ok(())
        }
    }
}

#[cfg(not(target_os = "linux"))]
mod unsupported {
    use std::convert::Infallible;

    use super::*;

    /// Pinned maps exist only on Linux; this type cannot be constructed.
    #[derive(Debug)]
    pub struct PinnedMap {
        never: Infallible,
    }

    impl PinnedMap {
        pub fn open(path: &Path) -> Result<Self, StoreError> {
            Err(StoreError::Io(format!(
                "cannot open {}: pinned BPF maps require Linux",
                path.display()
            )))
        }

        pub fn path(&self) -> &Path {
            match self.never {}
        }

        pub fn max_entries(&self) -> u32 {
            match self.never {}
        }
    }

    impl MapStore for PinnedMap {
        fn key_size(&self) -> usize {
            match self.never {}
        }

        fn value_size(&self) -> usize {
            match self.never {}
        }

        fn put(&mut self, _key: &[u8], _value: &[u8]) -> Result<(), StoreError> {
            match self.never {}
        }
    }
}
