use ip_lookup::external_ip::resolve_external_ip;
use ip_lookup::http::HttpClient;
use ip_lookup::location::LocationResolver;
use ip_lookup::output::build_output;

/// Prints `{"ip": ..., "full_data": {...}}` as one line and exits 0.
/// Arguments are ignored; every failure is reported in `full_data.error`.
fn main() {
    let client = HttpClient::new();
    let ip = resolve_external_ip(&client);
    let resolver = LocationResolver::new(&client);
    let output = build_output(ip, &resolver);

    println!("{}", output.to_json());
}
