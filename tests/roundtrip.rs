//! End-to-end sign/verify scenarios across constructions, hash functions,
//! matrix representations, file types, and underlying schemes.

use mtss::{
    BlockedMessage, CdssAlgorithm, CffMethod, DecoderKind, FileType, HashAlgorithm, KeyPair,
    MatrixKind, MtssSignature, Specification, SplitStrategy, Verification, VerifyingKey,
};

const TEXT: &[u8] = b"the quick brown fox\njumps over\nthe lazy dog\nwhile the cat\nwatches from the fence\nand the owl\nsleeps through it all\n";

fn text_lines() -> Vec<Vec<u8>> {
    TEXT.split_inclusive(|&b| b == b'\n').map(<[u8]>::to_vec).collect()
}

/// Rebuild `TEXT` with the 1-based lines in `changed` rewritten.
fn modified_text(changed: &[usize]) -> Vec<u8> {
    let mut lines = text_lines();
    for &line in changed {
        lines[line - 1] = format!("LINE {line} CHANGED\n").into_bytes();
    }
    lines.concat()
}

fn sign_text(
    spec: &Specification,
    keypair: &KeyPair,
) -> (MtssSignature, BlockedMessage) {
    let mut rng = rand_core::OsRng;
    let blocked = BlockedMessage::text(TEXT, SplitStrategy::BlockSize(1)).unwrap();
    let signature = mtss::sign(&mut rng, &blocked, spec, keypair.signing_key()).unwrap();
    (signature, blocked)
}

fn reverify(
    signature: &MtssSignature,
    message: &[u8],
    decoder: DecoderKind,
    verifying_key: &VerifyingKey,
) -> Verification {
    let received = BlockedMessage::split(
        message,
        signature.file_type,
        SplitStrategy::BlockSize(signature.block_size),
    )
    .unwrap();
    mtss::verify(&received, signature, decoder, verifying_key).unwrap()
}

#[test]
fn unchanged_across_all_parameter_combinations() {
    let mut rng = rand_core::OsRng;
    let keypair = KeyPair::generate(CdssAlgorithm::Ecdsa, &mut rng).unwrap();

    for (method, d) in [
        (CffMethod::Sperner, 1usize),
        (CffMethod::Sts, 2),
        (CffMethod::ReedSolomon, 2),
        (CffMethod::ReedSolomon, 3),
    ] {
        for hash in [
            HashAlgorithm::Sha2_256,
            HashAlgorithm::Sha2_512,
            HashAlgorithm::Sha3_256,
            HashAlgorithm::Sha3_512,
        ] {
            for matrix in [MatrixKind::List, MatrixKind::Compact] {
                for decoder in [DecoderKind::General, DecoderKind::Specific] {
                    let spec = Specification {
                        cdss: CdssAlgorithm::Ecdsa,
                        hash,
                        d,
                        method,
                        matrix,
                    };
                    let (signature, _) = sign_text(&spec, &keypair);
                    let outcome =
                        reverify(&signature, TEXT, decoder, keypair.verifying_key());
                    assert_eq!(
                        outcome,
                        Verification::Unchanged,
                        "{method:?} d={d} {hash:?} {matrix:?} {decoder:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn sperner_locates_a_single_modified_line() {
    let mut rng = rand_core::OsRng;
    let keypair = KeyPair::generate(CdssAlgorithm::Ecdsa, &mut rng).unwrap();
    let spec = Specification {
        cdss: CdssAlgorithm::Ecdsa,
        hash: HashAlgorithm::Sha2_256,
        d: 1,
        method: CffMethod::Sperner,
        matrix: MatrixKind::Compact,
    };
    let (signature, _) = sign_text(&spec, &keypair);

    for line in 1..=7usize {
        for decoder in [DecoderKind::General, DecoderKind::Specific] {
            let outcome = reverify(
                &signature,
                &modified_text(&[line]),
                decoder,
                keypair.verifying_key(),
            );
            assert_eq!(
                outcome,
                Verification::Modified {
                    defectives: vec![line],
                    located: true
                },
                "line {line} via {decoder:?}"
            );
        }
    }
}

#[test]
fn sts_locates_two_modified_lines() {
    let mut rng = rand_core::OsRng;
    let keypair = KeyPair::generate(CdssAlgorithm::Ecdsa, &mut rng).unwrap();
    let spec = Specification {
        cdss: CdssAlgorithm::Ecdsa,
        hash: HashAlgorithm::Sha2_256,
        d: 2,
        method: CffMethod::Sts,
        matrix: MatrixKind::List,
    };
    let (signature, _) = sign_text(&spec, &keypair);

    for decoder in [DecoderKind::General, DecoderKind::Specific] {
        let outcome = reverify(
            &signature,
            &modified_text(&[1, 4]),
            decoder,
            keypair.verifying_key(),
        );
        match outcome {
            Verification::Modified { mut defectives, located } => {
                assert!(located);
                defectives.sort_unstable();
                assert_eq!(defectives, vec![1, 4]);
            }
            other => panic!("unexpected outcome via {decoder:?}: {other:?}"),
        }
    }
}

#[test]
fn rs_locates_modified_blocks_in_a_large_text() {
    // one hundred single-line blocks
    let mut big: Vec<u8> = Vec::new();
    for i in 1..=100 {
        big.extend_from_slice(format!("payload line number {i}\n").as_bytes());
    }

    let mut rng = rand_core::OsRng;
    let keypair = KeyPair::generate(CdssAlgorithm::Ecdsa, &mut rng).unwrap();
    let spec = Specification {
        cdss: CdssAlgorithm::Ecdsa,
        hash: HashAlgorithm::Sha2_256,
        d: 2,
        method: CffMethod::ReedSolomon,
        matrix: MatrixKind::Compact,
    };
    let blocked = BlockedMessage::text(&big, SplitStrategy::BlockSize(1)).unwrap();
    assert_eq!(blocked.blocks().len(), 100);
    let signature = mtss::sign(&mut rng, &blocked, &spec, keypair.signing_key()).unwrap();

    let mut tampered = big.clone();
    let needle_five = b"payload line number 5\n".as_slice();
    let needle_fifty = b"payload line number 50\n".as_slice();
    tampered = replace(&tampered, needle_five, b"PAYLOAD LINE NUMBER 5\n");
    tampered = replace(&tampered, needle_fifty, b"PAYLOAD LINE NUMBER 50\n");

    for decoder in [DecoderKind::General, DecoderKind::Specific] {
        let outcome = reverify(&signature, &tampered, decoder, keypair.verifying_key());
        match outcome {
            Verification::Modified { mut defectives, located } => {
                assert!(located, "via {decoder:?}");
                defectives.sort_unstable();
                assert_eq!(defectives, vec![5, 50], "via {decoder:?}");
            }
            other => panic!("unexpected outcome via {decoder:?}: {other:?}"),
        }
    }
}

fn replace(haystack: &[u8], needle: &[u8], replacement: &[u8]) -> Vec<u8> {
    let position = haystack
        .windows(needle.len())
        .position(|w| w == needle)
        .expect("needle present");
    let mut out = haystack[..position].to_vec();
    out.extend_from_slice(replacement);
    out.extend_from_slice(&haystack[position + needle.len()..]);
    out
}

#[test]
fn modifications_beyond_capacity_are_flagged() {
    let mut rng = rand_core::OsRng;
    let keypair = KeyPair::generate(CdssAlgorithm::Ecdsa, &mut rng).unwrap();
    let spec = Specification {
        cdss: CdssAlgorithm::Ecdsa,
        hash: HashAlgorithm::Sha2_256,
        d: 1,
        method: CffMethod::Sperner,
        matrix: MatrixKind::List,
    };
    let (signature, _) = sign_text(&spec, &keypair);

    let outcome = reverify(
        &signature,
        &modified_text(&[2, 5]),
        DecoderKind::Specific,
        keypair.verifying_key(),
    );
    match outcome {
        Verification::Modified { defectives, located } => {
            assert!(!located);
            for line in [2usize, 5] {
                assert!(defectives.contains(&line));
            }
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn cryptographic_tampering_is_rejected() {
    let mut rng = rand_core::OsRng;
    let keypair = KeyPair::generate(CdssAlgorithm::Ecdsa, &mut rng).unwrap();
    let spec = Specification {
        cdss: CdssAlgorithm::Ecdsa,
        hash: HashAlgorithm::Sha2_256,
        d: 2,
        method: CffMethod::Sts,
        matrix: MatrixKind::Compact,
    };
    let (signature, blocked) = sign_text(&spec, &keypair);

    // flip one signature byte
    let mut tampered = signature.clone();
    tampered.signature[0] ^= 0x01;
    let outcome = mtss::verify(
        &blocked,
        &tampered,
        DecoderKind::Specific,
        keypair.verifying_key(),
    )
    .unwrap();
    assert_eq!(outcome, Verification::Invalid);

    // alter one digest of the signed tuple
    let mut tampered = signature.clone();
    tampered.tuple[0][0] ^= 0x01;
    let outcome = mtss::verify(
        &blocked,
        &tampered,
        DecoderKind::Specific,
        keypair.verifying_key(),
    )
    .unwrap();
    assert_eq!(outcome, Verification::Invalid);

    // alter a numeric parameter
    let mut tampered = signature.clone();
    tampered.block_size = 2;
    let outcome = mtss::verify(
        &blocked,
        &tampered,
        DecoderKind::Specific,
        keypair.verifying_key(),
    )
    .unwrap();
    assert_eq!(outcome, Verification::Invalid);

    // a different key never accepts
    let other = KeyPair::generate(CdssAlgorithm::Ecdsa, &mut rng).unwrap();
    let outcome = mtss::verify(
        &blocked,
        &signature,
        DecoderKind::Specific,
        other.verifying_key(),
    )
    .unwrap();
    assert_eq!(outcome, Verification::Invalid);
}

#[test]
fn block_count_drift_is_detected_but_not_located() {
    let mut rng = rand_core::OsRng;
    let keypair = KeyPair::generate(CdssAlgorithm::Ecdsa, &mut rng).unwrap();
    let spec = Specification {
        cdss: CdssAlgorithm::Ecdsa,
        hash: HashAlgorithm::Sha2_256,
        d: 2,
        method: CffMethod::Sts,
        matrix: MatrixKind::List,
    };
    let (signature, _) = sign_text(&spec, &keypair);

    let mut longer = TEXT.to_vec();
    longer.extend_from_slice(b"an extra line\n");
    let outcome = reverify(
        &signature,
        &longer,
        DecoderKind::Specific,
        keypair.verifying_key(),
    );
    assert_eq!(
        outcome,
        Verification::Modified {
            defectives: vec![],
            located: false
        }
    );
}

#[test]
fn image_modifications_are_located_per_tile() {
    let mut pgm = String::from("P2\n# probe\n8 8\n255\n");
    for row in 0..8 {
        for column in 0..8 {
            pgm.push_str(&format!("{} ", (row * 8 + column) % 256));
        }
        pgm.push('\n');
    }

    let mut rng = rand_core::OsRng;
    let keypair = KeyPair::generate(CdssAlgorithm::Ecdsa, &mut rng).unwrap();
    let spec = Specification {
        cdss: CdssAlgorithm::Ecdsa,
        hash: HashAlgorithm::Sha2_256,
        d: 2,
        method: CffMethod::Sts,
        matrix: MatrixKind::Compact,
    };
    // side-2 tiles over an 8x8 image: 16 blocks
    let blocked = BlockedMessage::image(pgm.as_bytes(), SplitStrategy::BlockSize(2)).unwrap();
    assert_eq!(blocked.blocks().len(), 16);
    assert_eq!(blocked.file_type(), FileType::Image);
    let signature = mtss::sign(&mut rng, &blocked, &spec, keypair.signing_key()).unwrap();

    // pixel (0, 0) lives in tile 1; pixel (7, 7) in tile 16
    let tampered = pgm.replacen("0 1 ", "9 1 ", 1).replace("62 63 ", "62 0 ");
    let received =
        BlockedMessage::image(tampered.as_bytes(), SplitStrategy::BlockSize(signature.block_size))
            .unwrap();
    let outcome = mtss::verify(
        &received,
        &signature,
        DecoderKind::Specific,
        keypair.verifying_key(),
    )
    .unwrap();
    match outcome {
        Verification::Modified { mut defectives, located } => {
            assert!(located);
            defectives.sort_unstable();
            assert_eq!(defectives, vec![1, 16]);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn fixed_block_count_strategy_round_trips() {
    let mut rng = rand_core::OsRng;
    let keypair = KeyPair::generate(CdssAlgorithm::Ecdsa, &mut rng).unwrap();
    let blocked = BlockedMessage::text(TEXT, SplitStrategy::BlockCount(7)).unwrap();
    let spec = Specification {
        cdss: CdssAlgorithm::Ecdsa,
        hash: HashAlgorithm::Sha3_256,
        d: 2,
        method: CffMethod::Sts,
        matrix: MatrixKind::List,
    };
    let signature = mtss::sign(&mut rng, &blocked, &spec, keypair.signing_key()).unwrap();
    // the verifier re-splits by the signed block size, not the count
    let outcome = reverify(&signature, TEXT, DecoderKind::General, keypair.verifying_key());
    assert_eq!(outcome, Verification::Unchanged);
}

#[test]
fn dilithium_and_falcon_round_trip() {
    let mut rng = rand_core::OsRng;
    for cdss in [CdssAlgorithm::Dilithium, CdssAlgorithm::Falcon] {
        let keypair = KeyPair::generate(cdss, &mut rng).unwrap();
        let spec = Specification {
            cdss,
            hash: HashAlgorithm::Sha2_256,
            d: 1,
            method: CffMethod::Sperner,
            matrix: MatrixKind::Compact,
        };
        let (signature, _) = sign_text(&spec, &keypair);
        assert_eq!(
            reverify(&signature, TEXT, DecoderKind::Specific, keypair.verifying_key()),
            Verification::Unchanged,
            "{cdss:?}"
        );
        assert_eq!(
            reverify(
                &signature,
                &modified_text(&[3]),
                DecoderKind::Specific,
                keypair.verifying_key()
            ),
            Verification::Modified {
                defectives: vec![3],
                located: true
            },
            "{cdss:?}"
        );
    }
}

// The RSA and SLH-DSA backends are exercised the same way but keygen and
// signing are orders of magnitude slower in debug builds; run with
// `cargo test -- --ignored` (ideally under --release).
#[test]
#[ignore]
fn rsa_and_sphincsplus_round_trip() {
    let mut rng = rand_core::OsRng;
    for cdss in [CdssAlgorithm::Rsa, CdssAlgorithm::SphincsPlus] {
        let keypair = KeyPair::generate(cdss, &mut rng).unwrap();
        let spec = Specification {
            cdss,
            hash: HashAlgorithm::Sha2_512,
            d: 2,
            method: CffMethod::Sts,
            matrix: MatrixKind::List,
        };
        let (signature, _) = sign_text(&spec, &keypair);
        assert_eq!(
            reverify(&signature, TEXT, DecoderKind::General, keypair.verifying_key()),
            Verification::Unchanged,
            "{cdss:?}"
        );

        let mut tampered = signature.clone();
        tampered.signature[0] ^= 0x01;
        let blocked = BlockedMessage::text(TEXT, SplitStrategy::BlockSize(1)).unwrap();
        assert_eq!(
            mtss::verify(&blocked, &tampered, DecoderKind::General, keypair.verifying_key())
                .unwrap(),
            Verification::Invalid,
            "{cdss:?}"
        );
    }
}
