use battleship_arbiter::{
    decode, decode_reply, encode, DecodeError, Dimensions, ErrorCode, QueryReport, Reply, Request,
    ShipSpec, Tag,
};

const FLEET: &str = "I 1 1 0 0 2 2 3 0 3 1 0 4 4 1 5 3 6 2 0 7";

#[test]
fn test_decode_begin() {
    assert_eq!(decode("B"), Ok(Request::Begin(None)));
    assert_eq!(
        decode("B 10 12"),
        Ok(Request::Begin(Some(Dimensions {
            width: 10,
            height: 12
        })))
    );
    // Range checks are not the codec's business.
    assert_eq!(
        decode("B 5 -5"),
        Ok(Request::Begin(Some(Dimensions {
            width: 5,
            height: -5
        })))
    );
    assert_eq!(decode("B 10"), Err(DecodeError::Malformed(Tag::Begin)));
    assert_eq!(decode("B 10 10 10"), Err(DecodeError::Malformed(Tag::Begin)));
    assert_eq!(decode("B ten 10"), Err(DecodeError::Malformed(Tag::Begin)));
}

#[test]
fn test_decode_initialize() {
    let Ok(Request::Initialize(fleet)) = decode(FLEET) else {
        panic!("fleet did not decode");
    };
    assert_eq!(fleet[0], ShipSpec::new(1, 1, 0, 0));
    assert_eq!(fleet[4], ShipSpec::new(6, 2, 0, 7));

    let short = "I 1 1 0 0 2 2 3 0 3 1 0 4 4 1 5 3 6 2 0";
    assert_eq!(decode(short), Err(DecodeError::Malformed(Tag::Initialize)));
    let long = format!("{} 1", FLEET);
    assert_eq!(decode(&long), Err(DecodeError::Malformed(Tag::Initialize)));
    let garbage = FLEET.replace(" 7", " 7x");
    assert_eq!(decode(&garbage), Err(DecodeError::Malformed(Tag::Initialize)));
}

#[test]
fn test_decode_play_messages() {
    assert_eq!(decode("S 3 4"), Ok(Request::Shoot { row: 3, col: 4 }));
    assert_eq!(decode("S -1 40"), Ok(Request::Shoot { row: -1, col: 40 }));
    assert_eq!(decode("S 3"), Err(DecodeError::Malformed(Tag::Shoot)));
    assert_eq!(decode("S 3 4 5"), Err(DecodeError::Malformed(Tag::Shoot)));
    assert_eq!(decode("S 3 4.5"), Err(DecodeError::Malformed(Tag::Shoot)));
    assert_eq!(decode("Q"), Ok(Request::Query));
    assert_eq!(decode("Q 1"), Err(DecodeError::Malformed(Tag::Query)));
    assert_eq!(decode("F"), Ok(Request::Forfeit));
    assert_eq!(decode("F please"), Ok(Request::Forfeit));
}

#[test]
fn test_decode_unknown_tags() {
    for line in ["", "   ", "X 1 2", "b 10 10", "BB 10 10", "Shoot 1 2"] {
        assert_eq!(decode(line), Err(DecodeError::UnknownTag), "{:?}", line);
    }
}

#[test]
fn test_decode_tolerates_extra_whitespace() {
    assert_eq!(decode("  S   3\t4 "), Ok(Request::Shoot { row: 3, col: 4 }));
}

#[test]
fn test_requests_encode_to_wire_form() {
    assert_eq!(Request::Begin(None).to_string(), "B");
    assert_eq!(
        Request::Begin(Some(Dimensions {
            width: 12,
            height: 11
        }))
        .to_string(),
        "B 12 11"
    );
    let Ok(fleet) = decode(FLEET) else {
        panic!("fleet did not decode");
    };
    assert_eq!(fleet.to_string(), FLEET);
    assert_eq!(Request::Shoot { row: 0, col: 9 }.to_string(), "S 0 9");
}

#[test]
fn test_encode_replies() {
    assert_eq!(encode(&Reply::Ack), "A");
    assert_eq!(encode(&Reply::Error(ErrorCode::InvalidBeginParameters)), "E 200");
    assert_eq!(encode(&Reply::Error(ErrorCode::AlreadyShot)), "E 401");
    assert_eq!(
        encode(&Reply::ShotResult {
            ships_remaining: 5,
            hit: true
        }),
        "R 5 H"
    );
    assert_eq!(
        encode(&Reply::ShotResult {
            ships_remaining: 2,
            hit: false
        }),
        "R 2 M"
    );
    assert_eq!(encode(&Reply::Halt { won: false }), "H 0");
    assert_eq!(encode(&Reply::Halt { won: true }), "H 1");
    let report = QueryReport {
        ships_remaining: 4,
        hits: vec![(0, 0)],
        misses: vec![(2, 3), (9, 9)],
    };
    assert_eq!(encode(&Reply::Query(report)), "G 4 H 0 0 M 2 3 M 9 9");
}

#[test]
fn test_error_codes() {
    let codes = [
        (ErrorCode::ExpectedBegin, 100),
        (ErrorCode::ExpectedInitialize, 101),
        (ErrorCode::InvalidPlayRequest, 102),
        (ErrorCode::InvalidBeginParameters, 200),
        (ErrorCode::InvalidInitializeParameters, 201),
        (ErrorCode::InvalidShotParameters, 202),
        (ErrorCode::InvalidShape, 300),
        (ErrorCode::InvalidRotation, 301),
        (ErrorCode::ShipOutOfBounds, 302),
        (ErrorCode::ShipOverlap, 303),
        (ErrorCode::ShotOutOfBounds, 400),
        (ErrorCode::AlreadyShot, 401),
    ];
    for (error, code) in codes {
        assert_eq!(error.code(), code);
        assert_eq!(ErrorCode::from_code(code), Some(error));
    }
    assert_eq!(ErrorCode::from_code(999), None);
}

#[test]
fn test_decode_reply() {
    assert_eq!(decode_reply("A"), Some(Reply::Ack));
    assert_eq!(
        decode_reply("E 303"),
        Some(Reply::Error(ErrorCode::ShipOverlap))
    );
    assert_eq!(
        decode_reply("R 0 H"),
        Some(Reply::ShotResult {
            ships_remaining: 0,
            hit: true
        })
    );
    assert_eq!(decode_reply("H 1"), Some(Reply::Halt { won: true }));
    assert_eq!(
        decode_reply("G 3 H 1 1 M 0 4"),
        Some(Reply::Query(QueryReport {
            ships_remaining: 3,
            hits: vec![(1, 1)],
            misses: vec![(0, 4)],
        }))
    );
    assert_eq!(decode_reply("G 3 H 1"), None);
    assert_eq!(decode_reply("R 1 X"), None);
    assert_eq!(decode_reply("H 2"), None);
    assert_eq!(decode_reply("E 42"), None);
}
