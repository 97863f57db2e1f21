use netroute::network::parser::{parse_network, parse_route};
use netroute::network::{Device, EngineKind, Host, TieBreakKey};
use netroute::{Error, Network, TieBreakPolicy};
use std::io::Cursor;

const LAB: &str = "\
# lab network
[host]
pc1,192.168.1.10,R1
pc2,192.168.2.10,R4

[device]
R1,10.0.0.1
R2,10.0.0.2
R3,10.0.0.3
R4,10.0.0.4
R5,10.0.0.5

[route]
R1->R2,1
R1->R3,1
R2->R4,1
R3->R4,1
R4->R1,2
";

fn lab() -> Network {
    parse_network(LAB).expect("lab network parses")
}

fn policy(name: &str) -> TieBreakPolicy {
    name.parse().expect("valid policy")
}

#[test]
fn test_parse_lab_network() {
    let network = lab();

    assert_eq!(network.devices().len(), 5);
    assert_eq!(network.hosts().len(), 2);
    assert_eq!(network.links().len(), 5);

    let r3 = network.device_id("R3").expect("R3 declared");
    assert_eq!(r3.index(), 2);
    assert_eq!(network.device(r3).map(|d| d.ip.to_string()), Some("10.0.0.3".to_string()));

    let pc2 = network.host("pc2").expect("pc2 declared");
    assert_eq!(pc2.device, "R4");

    let first = &network.links()[0];
    assert_eq!((first.from.as_str(), first.to.as_str(), first.weight), ("R1", "R2", 1));
}

#[test]
fn test_parse_from_reader_and_from_str() {
    let from_reader = Network::from_reader(Cursor::new(LAB)).unwrap();
    let from_str: Network = LAB.parse().unwrap();

    assert_eq!(from_reader.devices(), from_str.devices());
    assert_eq!(from_reader.links(), from_str.links());
}

#[test]
fn test_parse_errors_carry_line_numbers() {
    let cases = [
        ("R1,10.0.0.1\n", 1),
        ("[device]\nR1,10.0.0.1\n[links]\n", 3),
        ("[device]\nR1,not-an-ip\n", 2),
        ("[device]\nR1\n", 2),
        ("[device]\nR1,10.0.0.1\nR2,10.0.0.2\n[route]\nR1->R2,heavy\n", 5),
        ("[device]\nR1,10.0.0.1\n[route]\nR1,R2,4\n", 4),
    ];

    for (input, expected_line) in cases {
        match parse_network(input) {
            Err(Error::Parse { line, .. }) => {
                assert_eq!(line, expected_line, "wrong line for {:?}", input)
            }
            other => panic!("expected a parse error for {:?}, got {:?}", input, other),
        }
    }
}

#[test]
fn test_parse_semantic_errors() {
    let unknown_route_end = "[device]\nR1,10.0.0.1\n[route]\nR1->R9,1\n";
    assert!(matches!(
        parse_network(unknown_route_end),
        Err(Error::UnknownDevice(name)) if name == "R9"
    ));

    let duplicate = "[device]\nR1,10.0.0.1\nR1,10.0.0.2\n";
    assert!(matches!(
        parse_network(duplicate),
        Err(Error::DuplicateDevice(name)) if name == "R1"
    ));

    let self_loop = "[device]\nR1,10.0.0.1\n[route]\nR1->R1,3\n";
    assert!(matches!(parse_network(self_loop), Err(Error::SelfLoop(_))));

    let orphan_host = "[host]\npc,192.168.0.2,R7\n[device]\nR1,10.0.0.1\n";
    assert!(matches!(
        parse_network(orphan_host),
        Err(Error::UnknownDevice(name)) if name == "R7"
    ));
}

#[test]
fn test_parse_route_line() {
    let route = parse_route(" R1 -> R2 , 7 ", 1).unwrap();
    assert_eq!(route.from, "R1");
    assert_eq!(route.to, "R2");
    assert_eq!(route.weight, 7);

    assert!(parse_route("->R2,7", 1).is_err());
    assert!(parse_route("R1->R2,-3", 1).is_err(), "weights are unsigned");
}

#[test]
fn test_routes_from_source() {
    let network = lab();
    let report = network.routes_from("R1", TieBreakPolicy::default()).unwrap();

    assert_eq!(report.source, "R1");
    assert_eq!(report.routes.len(), 4, "one route per other device");
    let destinations: Vec<&str> = report.routes.iter().map(|r| r.destination.as_str()).collect();
    assert_eq!(destinations, vec!["R2", "R3", "R4", "R5"]);

    let to_r4 = report.route_to("R4").unwrap();
    assert_eq!(to_r4.cost, Some(2));
    assert_eq!(to_r4.hops, vec!["R1", "R2", "R4"]);
    assert_eq!(to_r4.to_string(), "R1 -> R4: cost 2 via R1 > R2 > R4");

    let to_r5 = report.route_to("R5").unwrap();
    assert_eq!(to_r5.cost, None);
    assert!(to_r5.hops.is_empty());
    assert_eq!(to_r5.to_string(), "R1 -> R5: unreachable");
}

#[test]
fn test_tie_break_policies_pick_route() {
    let network = lab();
    let via = |name: &str| {
        network
            .routes_from("R1", policy(name))
            .unwrap()
            .route_to("R4")
            .map(|route| route.hops.clone())
            .unwrap()
    };

    assert_eq!(via("name"), vec!["R1", "R2", "R4"]);
    assert_eq!(via("name-desc"), vec!["R1", "R3", "R4"]);
    assert_eq!(via("address"), vec!["R1", "R2", "R4"]);
    assert_eq!(via("ip-desc"), vec!["R1", "R3", "R4"]);
    assert_eq!(via("listed"), vec!["R1", "R2", "R4"]);
    assert_eq!(via("listed-desc"), vec!["R1", "R3", "R4"]);
}

#[test]
fn test_engines_agree_on_routes() {
    let network = lab();
    for name in ["name", "name-desc", "address", "listed-desc"] {
        for device in network.devices() {
            let marking = network
                .routes_from_with(&device.name, policy(name), EngineKind::Marking)
                .unwrap();
            let heap = network
                .routes_from_with(&device.name, policy(name), EngineKind::Heap)
                .unwrap();
            assert_eq!(marking, heap, "engines disagree from {} with {}", device.name, name);
        }
    }
}

#[test]
fn test_unknown_source_device() {
    let network = lab();
    assert!(matches!(
        network.routes_from("R9", TieBreakPolicy::default()),
        Err(Error::UnknownDevice(name)) if name == "R9"
    ));
}

#[test]
fn test_host_route() {
    let network = lab();

    let forward = network.host_route("pc1", "pc2", TieBreakPolicy::default()).unwrap();
    assert_eq!(forward.source, "R1");
    assert_eq!(forward.destination, "R4");
    assert_eq!(forward.cost, Some(2));
    assert_eq!(forward.hops, vec!["R1", "R2", "R4"]);

    let back = network.host_route("pc2", "pc1", TieBreakPolicy::default()).unwrap();
    assert_eq!(back.cost, Some(2));
    assert_eq!(back.hops, vec!["R4", "R1"]);

    assert!(matches!(
        network.host_route("pc1", "pc9", TieBreakPolicy::default()),
        Err(Error::UnknownHost(name)) if name == "pc9"
    ));
}

#[test]
fn test_routing_table_matches_single_reports() {
    let network = lab();
    let policy = policy("name-desc");
    let table = network.routing_table(policy).unwrap();

    assert_eq!(table.len(), network.devices().len());
    for (report, device) in table.iter().zip(network.devices()) {
        assert_eq!(report.source, device.name);
        assert_eq!(report, &network.routes_from(&device.name, policy).unwrap());
    }
}

#[test]
fn test_build_network_programmatically() {
    let mut network = Network::new();
    let core = network
        .add_device(Device {
            name: "core".to_string(),
            ip: "10.1.0.1".parse().unwrap(),
        })
        .unwrap();
    network
        .add_device(Device {
            name: "edge".to_string(),
            ip: "10.1.0.2".parse().unwrap(),
        })
        .unwrap();

    assert_eq!(core.index(), 0);
    assert!(network
        .add_host(Host {
            name: "laptop".to_string(),
            ip: "10.1.1.5".parse().unwrap(),
            device: "nowhere".to_string(),
        })
        .is_err());

    network.add_link("core", "edge", 4).unwrap();
    network.add_link("core", "edge", 9).unwrap();
    assert_eq!(network.links().len(), 1, "redeclared link replaces the old one");
    assert_eq!(network.links()[0].weight, 9);
    assert!(network.add_link("core", "ghost", 1).is_err());

    let report = network.routes_from("core", TieBreakPolicy::default()).unwrap();
    assert_eq!(report.route_to("edge").and_then(|route| route.cost), Some(9));
}

#[test]
fn test_policy_parsing() {
    assert_eq!(policy("name"), TieBreakPolicy::ascending(TieBreakKey::Name));
    assert_eq!(policy("NAME-asc"), TieBreakPolicy::ascending(TieBreakKey::Name));
    assert_eq!(policy("ip"), TieBreakPolicy::ascending(TieBreakKey::Address));
    assert_eq!(policy("first-desc"), TieBreakPolicy::descending(TieBreakKey::Listed));
    assert_eq!(policy("address").reversed().to_string(), "address-desc");
    assert_eq!(TieBreakPolicy::default().to_string(), "name");

    assert!(matches!(
        "fastest".parse::<TieBreakPolicy>(),
        Err(Error::InvalidTieBreak(_))
    ));

    assert_eq!("heap".parse::<EngineKind>().unwrap(), EngineKind::Heap);
    assert_eq!("Dijkstra".parse::<EngineKind>().unwrap(), EngineKind::Marking);
    assert!(matches!("bfs".parse::<EngineKind>(), Err(Error::InvalidEngine(_))));
}

#[test]
fn test_policy_serde() {
    let json = serde_json::to_string(&policy("listed-desc")).unwrap();
    assert_eq!(json, "\"listed-desc\"");

    let parsed: TieBreakPolicy = serde_json::from_str("\"address\"").unwrap();
    assert_eq!(parsed, TieBreakPolicy::ascending(TieBreakKey::Address));
    assert!(serde_json::from_str::<TieBreakPolicy>("\"cheapest\"").is_err());

    let engine: EngineKind = serde_json::from_str("\"heap\"").unwrap();
    assert_eq!(engine, EngineKind::Heap);
}

#[test]
fn test_campus_network_file() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/campus.net");
    let network = Network::from_reader(std::fs::File::open(path).unwrap()).unwrap();

    assert_eq!(network.devices().len(), 7);
    assert_eq!(network.hosts().len(), 3);

    let route = network
        .host_route("lab-pc", "printer", TieBreakPolicy::default())
        .unwrap();
    assert_eq!(route.cost, Some(7));
    assert_eq!(route.hops, vec!["edge-a", "dist-a", "core1", "dist-b", "edge-b"]);

    // The backup router only has an uplink, nothing routes back to it
    for report in network.routing_table(TieBreakPolicy::default()).unwrap() {
        if report.source != "backup" {
            assert_eq!(report.route_to("backup").and_then(|r| r.cost), None);
        }
    }
}
