//! CPU runtime implementation

use super::client::{CpuAllocator, CpuClient};
use super::device::CpuDevice;
use crate::error::{Error, Result};
use crate::runtime::Runtime;

/// CPU compute runtime
///
/// Memory is allocated on the heap using the system allocator; device
/// handles are host addresses.
#[derive(Clone, Debug, Default)]
pub struct CpuRuntime;

impl Runtime for CpuRuntime {
    type Device = CpuDevice;
    type Client = CpuClient;
    type Allocator = CpuAllocator;

    fn name() -> &'static str {
        "cpu"
    }

    fn copy_to_device(src: &[u8], dst: u64, _device: &Self::Device) -> Result<()> {
        if src.is_empty() {
            return Ok(());
        }
        if dst == 0 {
            return Err(Error::Backend(format!(
                "copy_to_device: null destination for {} bytes",
                src.len()
            )));
        }

        unsafe {
            std::ptr::copy_nonoverlapping(src.as_ptr(), dst as *mut u8, src.len());
        }
        Ok(())
    }

    fn copy_from_device(src: u64, dst: &mut [u8], _device: &Self::Device) -> Result<()> {
        if dst.is_empty() {
            return Ok(());
        }
        if src == 0 {
            return Err(Error::Backend(format!(
                "copy_from_device: null source for {} bytes",
                dst.len()
            )));
        }

        unsafe {
            std::ptr::copy_nonoverlapping(src as *const u8, dst.as_mut_ptr(), dst.len());
        }
        Ok(())
    }

    fn default_device() -> Self::Device {
        CpuDevice::new()
    }

    fn default_client(device: &Self::Device) -> Self::Client {
        CpuClient::new(device.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{Allocator, RuntimeClient};

    #[test]
    fn test_roundtrip_through_device_memory() {
        let device = CpuRuntime::default_device();
        let client = CpuRuntime::default_client(&device);

        let src: Vec<u8> = (0..32).collect();
        let ptr = client.allocator().allocate(src.len()).unwrap();
        CpuRuntime::copy_to_device(&src, ptr, &device).unwrap();

        let mut dst = vec![0u8; src.len()];
        CpuRuntime::copy_from_device(ptr, &mut dst, &device).unwrap();
        assert_eq!(src, dst);

        client.allocator().deallocate(ptr, src.len());
        assert_eq!(client.allocator().allocated_bytes(), 0);
    }

    #[test]
    fn test_null_handles_are_rejected() {
        let device = CpuDevice::new();
        assert!(CpuRuntime::copy_to_device(&[1, 2, 3], 0, &device).is_err());
        let mut dst = [0u8; 4];
        assert!(CpuRuntime::copy_from_device(0, &mut dst, &device).is_err());
        // Empty transfers never touch the handle
        assert!(CpuRuntime::copy_to_device(&[], 0, &device).is_ok());
    }
}
