use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;

/// Buffer size for the portable read/write loop.
const COPY_BUF_SIZE: usize = 128 * 1024;

/// Copy the full content of `src` to `dst`, overwriting `dst`.
///
/// Content only: no mode, ownership, or timestamp propagation. The
/// destination is created if missing and truncated first. Fails with
/// NotFound when `src` does not exist; the caller is responsible for the
/// destination's parent directory.
pub fn copy_file_bytes(src: &Path, dst: &Path) -> io::Result<()> {
    // Try Linux copy_file_range for in-kernel copying.
    #[cfg(target_os = "linux")]
    {
        match copy_file_range_linux(src, dst) {
            Ok(()) => return Ok(()),
            Err(e)
                if matches!(
                    e.raw_os_error(),
                    Some(libc::EINVAL | libc::ENOSYS | libc::EXDEV)
                ) =>
            {
                // Unsupported filesystem or cross-device — fall through
                // to the buffered loop.
            }
            Err(e) => return Err(e),
        }
    }

    buffered_copy(src, dst)
}

/// Portable fallback: sequential open/read/write/close streaming.
fn buffered_copy(src: &Path, dst: &Path) -> io::Result<()> {
    let mut reader = File::open(src)?;
    let mut writer = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(dst)?;

    let mut buf = vec![0u8; COPY_BUF_SIZE];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        writer.write_all(&buf[..n])?;
    }
    Ok(())
}

#[cfg(target_os = "linux")]
fn copy_file_range_linux(src: &Path, dst: &Path) -> io::Result<()> {
    use std::os::unix::io::AsRawFd;

    let src_file = File::open(src)?;
    let len = src_file.metadata()?.len();

    let dst_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(dst)?;

    let mut remaining = len as i64;
    while remaining > 0 {
        // Cap to isize::MAX to avoid overflow on 32-bit when casting to usize.
        let to_copy = (remaining as u64).min(isize::MAX as u64) as usize;
        // SAFETY: src_file and dst_file are valid open file descriptors;
        // null offsets mean the kernel uses and updates the file offsets.
        let ret = unsafe {
            libc::copy_file_range(
                src_file.as_raw_fd(),
                std::ptr::null_mut(),
                dst_file.as_raw_fd(),
                std::ptr::null_mut(),
                to_copy,
                0,
            )
        };
        if ret < 0 {
            return Err(io::Error::last_os_error());
        }
        if ret == 0 {
            // EOF before all bytes copied — break to avoid infinite loop
            break;
        }
        remaining -= ret as i64;
    }
    Ok(())
}
