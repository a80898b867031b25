//! Storage volume arguments.

use crate::models::DeviceInfo;

/// Build `--num_volumes`/`--mount_points`, `--volume_size` and `--disk_iops` arguments.
///
/// Volume count wins over mount points; the two are never emitted together.
/// An empty layout yields no arguments.
pub fn device_args(device_info: &DeviceInfo) -> Vec<String> {
    let mut args = Vec::new();

    if let Some(num_volumes) = device_info.num_volumes {
        args.push("--num_volumes".to_string());
        args.push(num_volumes.to_string());
    } else if let Some(mount_points) = &device_info.mount_points {
        args.push("--mount_points".to_string());
        args.push(mount_points.clone());
    }

    if let Some(volume_size) = device_info.volume_size {
        args.push("--volume_size".to_string());
        args.push(volume_size.to_string());
    }

    if let Some(disk_iops) = device_info.disk_iops {
        args.push("--disk_iops".to_string());
        args.push(disk_iops.to_string());
    }

    log::debug!("[DeviceArgs] {} device argument(s)", args.len());
    args
}
