use crate::ssh::{collect_lines, render_wql_script};
use serde_json::Value;
use crate::{parse_wql_output, result_set_name};
use winguest_core::{OutputStream, WinGuestError};

#[test]
fn test_collect_lines_tags_streams() {
    let output = collect_lines("3\r\n", "warning: slow\n");

    assert_eq!(output.lines.len(), 2);
    assert_eq!(output.lines[0].stream, OutputStream::Stdout);
    assert_eq!(output.lines[0].text, "3");
    assert_eq!(output.lines[1].stream, OutputStream::Stderr);
    assert_eq!(output.stdout(), "3");
}

#[test]
fn test_collect_lines_empty_output() {
    assert!(collect_lines("", "").is_empty());
}

#[test]
fn test_result_set_name() {
    assert_eq!(
        result_set_name("SELECT * FROM Win32_NetworkAdapter WHERE MACAddress IS NOT NULL"),
        Some("win32_network_adapter".to_string())
    );
    assert_eq!(
        result_set_name("select Index from Win32_NetworkAdapterConfiguration"),
        Some("win32_network_adapter_configuration".to_string())
    );
    assert_eq!(result_set_name("SELECT *"), None);
}

const ADAPTER_QUERY: &str = "SELECT * FROM Win32_NetworkAdapter WHERE MACAddress IS NOT NULL";

#[test]
fn test_wql_script_runs_on_powershell_2() {
    let script = render_wql_script(ADAPTER_QUERY).unwrap();

    assert!(script.contains(r#"Get-WmiObject -Query "SELECT * FROM Win32_NetworkAdapter"#));
    assert!(script.ends_with("ConvertTo-Csv -NoTypeInformation"));
    assert!(!script.contains("ConvertTo-Json"));
}

#[test]
fn test_parse_wql_output_reads_csv_rows() {
    let output = "\"MACAddress\",\"NetConnectionID\",\"InterfaceIndex\",\"Index\"\r\n\
                  \"08:00:27:5F:AC:5B\",\"Local Area Connection\",\"11\",\"7\"\r\n\
                  \"08:00:27:D5:B3:C4\",\"\",\"12\",\"8\"\r\n";

    let result = parse_wql_output("win7", ADAPTER_QUERY, output).unwrap();
    let rows = &result["win32_network_adapter"];

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["MACAddress"], "08:00:27:5F:AC:5B");
    assert_eq!(rows[0]["NetConnectionID"], "Local Area Connection");
    assert_eq!(rows[0]["Index"], "7");
    assert_eq!(rows[1]["NetConnectionID"], Value::Null);
}

#[test]
fn test_parse_wql_output_rows_feed_adapter_normalization() {
    let output = "\"MACAddress\",\"NetConnectionID\",\"InterfaceIndex\",\"Index\"\n\
                  \"08:00:27:5F:AC:5B\",\"Local Area Connection\",\"11\",\"7\"\n";

    let result = parse_wql_output("win7", ADAPTER_QUERY, output).unwrap();
    let adapters = winguest_network::parse_wql_rows(&result["win32_network_adapter"]).unwrap();

    assert_eq!(adapters.len(), 1);
    assert_eq!(adapters[0].name, "Local Area Connection");
    assert_eq!(adapters[0].mac_address.as_str(), "0800275FAC5B");
    assert_eq!(adapters[0].interface_index, "11");
    assert_eq!(adapters[0].index, "7");
}

#[test]
fn test_parse_wql_output_without_rows() {
    let none = parse_wql_output("win7", ADAPTER_QUERY, "\r\n").unwrap();
    assert!(none["win32_network_adapter"].is_empty());

    let header_only = parse_wql_output("win7", ADAPTER_QUERY, "\"MACAddress\",\"Index\"\r\n").unwrap();
    assert!(header_only["win32_network_adapter"].is_empty());
}

#[test]
fn test_parse_wql_output_rejects_ragged_rows() {
    let output = "\"MACAddress\",\"Index\"\n\"08:00:27:5F:AC:5B\",\"7\"\n\"stray\"\n";

    match parse_wql_output("win7", ADAPTER_QUERY, output) {
        Err(WinGuestError::CommandFailed { machine, message }) => {
            assert_eq!(machine, "win7");
            assert!(message.contains("Malformed WQL row"));
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
}

#[test]
fn test_parse_wql_output_names_the_machine_on_bad_query() {
    match parse_wql_output("win7", "SELECT *", "") {
        Err(WinGuestError::CommandFailed { machine, .. }) => assert_eq!(machine, "win7"),
        other => panic!("expected CommandFailed, got {other:?}"),
    }
}
