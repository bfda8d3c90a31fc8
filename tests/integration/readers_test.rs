use hostmon::core::system_monitor::readers::disk::read_root_device;
use hostmon::core::system_monitor::readers::{
    read_cpu_model, read_cpu_times, read_fans, read_interfaces, read_memory, read_process_state,
    read_thermal, read_uptime,
};
use hostmon::core::system_monitor::{ProcessState, UNKNOWN_DEVICE};

use super::fixture::Fixture;

const NET_DEV: &str = "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
 test0:  123456     789    1    2    0     0          0         3    654321     987    0    0    0     0       0          0
 test1: 10 20
";

#[test]
fn test_meminfo_from_fixture() {
    let fixture = Fixture::new();
    fixture.proc_file(
        "meminfo",
        "MemTotal:       16000000 kB\nMemFree:         2000000 kB\nMemAvailable:    8000000 kB\nSwapTotal:       1000 kB\nSwapFree:        250 kB\n",
    );

    let memory = read_memory(&fixture.procfs());
    assert!(memory.available);
    assert_eq!(memory.value.total_bytes, 16_000_000 * 1024);
    assert_eq!(memory.value.used_bytes, 8_000_000 * 1024);
    assert_eq!(memory.value.swap_used_bytes, 750 * 1024);
    assert!((memory.value.usage_percent() - 50.0).abs() < 1e-9);
}

#[test]
fn test_net_dev_from_fixture() {
    let fixture = Fixture::new();
    fixture.proc_file("net/dev", NET_DEV);

    let interfaces = read_interfaces(&fixture.procfs());
    assert!(interfaces.available);
    assert_eq!(interfaces.value.len(), 2);

    let first = &interfaces.value[0];
    assert_eq!(first.name, "test0");
    assert_eq!(first.rx.bytes, 123_456);
    assert_eq!(first.rx.multicast, 3);
    assert_eq!(first.tx.bytes, 654_321);
    assert_eq!(first.tx.packets, 987);

    let short = &interfaces.value[1];
    assert_eq!(short.rx.bytes, 10);
    assert_eq!(short.rx.packets, 20);
    assert_eq!(short.tx.bytes, 0);
}

#[test]
fn test_thermal_zones_in_index_order() {
    let fixture = Fixture::new();
    fixture.sys_file("class/thermal/thermal_zone0/temp", "45000\n");
    fixture.sys_file("class/thermal/thermal_zone0/type", "x86_pkg_temp\n");
    fixture.sys_file("class/thermal/thermal_zone1/temp", "38500\n");
    fixture.sys_file("class/thermal/thermal_zone1/type", "acpitz\n");
    // zone without a type is skipped
    fixture.sys_file("class/thermal/thermal_zone2/temp", "99000\n");

    let thermal = read_thermal(&fixture.procfs(), 10);
    assert!(thermal.available);
    assert_eq!(thermal.value.len(), 2);
    assert_eq!(thermal.value[0].label, "x86_pkg_temp");
    assert_eq!(thermal.value[0].celsius, 45.0);
    assert_eq!(thermal.value[1].label, "acpitz");
    assert_eq!(thermal.value[1].celsius, 38.5);
}

#[test]
fn test_vendor_thermal_file_preferred() {
    let fixture = Fixture::new();
    fixture.proc_file("acpi/ibm/thermal", "temperatures:\t50 0 41 -128 0 0 0 0\n");
    fixture.sys_file("class/thermal/thermal_zone0/temp", "45000\n");
    fixture.sys_file("class/thermal/thermal_zone0/type", "acpitz\n");

    let thermal = read_thermal(&fixture.procfs(), 10);
    assert_eq!(thermal.value.len(), 2);
    assert_eq!(thermal.value[0].label, "IBM Sensor 0");
    assert_eq!(thermal.value[1].label, "IBM Sensor 2");
    assert_eq!(thermal.value[1].celsius, 41.0);
}

#[test]
fn test_thermal_zone_limit() {
    let fixture = Fixture::new();
    for i in 0..3 {
        fixture.sys_file(&format!("class/thermal/thermal_zone{}/temp", i), "30000\n");
        fixture.sys_file(&format!("class/thermal/thermal_zone{}/type", i), "zone\n");
    }

    assert_eq!(read_thermal(&fixture.procfs(), 2).value.len(), 2);
}

#[test]
fn test_fans_with_and_without_labels() {
    let fixture = Fixture::new();
    fixture.sys_file("class/hwmon/hwmon0/fan1_input", "2100\n");
    fixture.sys_file("class/hwmon/hwmon0/fan1_label", "cpu_fan\n");
    fixture.sys_file("class/hwmon/hwmon1/temp1_input", "40000\n");
    fixture.sys_file("class/hwmon/hwmon2/fan1_input", "850\n");

    let fans = read_fans(&fixture.procfs(), 10);
    assert!(fans.available);
    assert_eq!(fans.value.len(), 2);
    assert_eq!(fans.value[0].label, "cpu_fan");
    assert_eq!(fans.value[0].rpm, 2100);
    assert_eq!(fans.value[1].label, "Fan 3");
    assert_eq!(fans.value[1].rpm, 850);
}

#[test]
fn test_process_state_lookup() {
    let fixture = Fixture::new();
    fixture.process(77, "sleepy", 'D', 0, 0, 0);

    let fs = fixture.procfs();
    assert_eq!(read_process_state(&fs, 77), ProcessState::DiskSleep);
    assert_eq!(read_process_state(&fs, 78), ProcessState::Unknown);
}

#[test]
fn test_root_device_from_mounts() {
    let fixture = Fixture::new();
    fixture.proc_file(
        "mounts",
        "rootfs / rootfs rw 0 0\nproc /proc proc rw 0 0\n/dev/nvme0n1p2 / ext4 rw,relatime 0 0\n",
    );

    assert_eq!(read_root_device(&fixture.procfs()), "/dev/nvme0n1p2");
}

#[test]
fn test_empty_tree_is_unavailable() {
    let fixture = Fixture::new();
    let fs = fixture.procfs();

    assert!(!read_cpu_times(&fs).available);
    assert!(!read_uptime(&fs).available);
    assert!(!read_memory(&fs).available);
    assert!(!read_interfaces(&fs).available);

    let thermal = read_thermal(&fs, 10);
    assert!(!thermal.available);
    assert!(thermal.value.is_empty());

    let fans = read_fans(&fs, 10);
    assert!(!fans.available);
    assert!(fans.value.is_empty());

    assert_eq!(read_cpu_model(&fs), "Unknown CPU");
    assert_eq!(read_root_device(&fs), UNKNOWN_DEVICE);
}
