//! End-to-end chunking pipeline tests.

use docsift::chunking::{ChunkBuilder, SectionSplitter, SentenceSplitter};

#[test]
fn test_sectioned_document_end_to_end() {
    let text = "Introduction:\nThis is sentence one. This is sentence two. This is sentence three.";
    let builder = ChunkBuilder::new(40, 10).unwrap();
    let chunks = builder.chunk_text(text);

    assert!(chunks.len() >= 2);
    assert!(chunks[0].text.starts_with("Introduction:"));
    assert!(chunks.iter().all(|c| c.text.contains("sentence")));

    let total = chunks.len();
    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.index, i);
        assert_eq!(chunk.total, total);
    }
}

#[test]
fn test_overlap_continuity_across_chunks() {
    // Overlap large enough to carry a whole sentence forward
    let text = "Heading:\nAlpha beta gamma. Delta epsilon zeta. Eta theta iota. Kappa lambda mu.";
    let builder = ChunkBuilder::new(45, 30).unwrap();
    let chunks = builder.chunk_text(text);

    assert!(chunks.len() >= 2);
    for window in chunks.windows(2) {
        let tail = window[0].text.split('\n').next_back().unwrap();
        if tail.chars().count() <= 30 {
            assert!(
                window[1].text.starts_with(tail),
                "chunk {:?} should start with carried tail {:?}",
                window[1].text,
                tail
            );
        }
    }
}

#[test]
fn test_chunk_size_bound_holds() {
    let text = "Some preamble without headers. Another line of prose here. And a third one too. \
                Plus a fourth sentence. And finally a fifth sentence to close.";
    let chunk_size = 60;
    let builder = ChunkBuilder::new(chunk_size, 15).unwrap();
    let chunks = builder.chunk_text(text);

    for chunk in &chunks {
        let fragments: Vec<&str> = chunk.text.split('\n').collect();
        let longest = fragments.iter().map(|f| f.chars().count()).max().unwrap();
        let separators = fragments.len().saturating_sub(1);
        assert!(
            chunk.text.chars().count() <= chunk_size + longest + separators,
            "chunk too large: {:?}",
            chunk.text
        );
    }
}

#[test]
fn test_empty_document_produces_nothing() {
    let builder = ChunkBuilder::new(100, 10).unwrap();
    assert!(builder.chunk_text("").is_empty());

    let splitter = SentenceSplitter::new();
    assert!(splitter.split("").is_empty());
}

#[test]
fn test_markdown_document_sections_reach_chunks() {
    let text = "# Guide\nFirst part of the guide. More guide text.\n\
                ## Setup\nInstall the thing. Configure the thing.\n\
                ## Usage\nRun the thing. Observe the output.";
    let builder = ChunkBuilder::new(55, 10).unwrap();
    let chunks = builder.chunk_text(text);

    assert!(chunks.iter().any(|c| c.text.starts_with("# Guide")));
    assert!(chunks.iter().any(|c| c.text.starts_with("## Setup")));
    assert!(chunks.iter().any(|c| c.text.starts_with("## Usage")));
}

#[test]
fn test_section_splitter_preamble_and_underline() {
    let text = "Some notes before anything.\nOverview\n========\nBody of the overview.";
    let sections = SectionSplitter::new().split(text);

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].title, None);
    assert_eq!(sections[1].title.as_deref(), Some("Overview"));
    assert_eq!(sections[1].content, vec!["Body of the overview."]);
}

#[test]
fn test_abbreviations_do_not_split_sentences() {
    let splitter = SentenceSplitter::new();
    let sentences = splitter.split("Dr. Park spoke with Prof. Chen. The meeting went well.");
    assert_eq!(
        sentences,
        vec!["Dr. Park spoke with Prof. Chen", "The meeting went well"]
    );
}

#[test]
fn test_reconstruction_without_overlap() {
    // With zero overlap, concatenating chunk fragments reproduces the
    // sentence stream exactly once
    let text = "One two three four. Five six seven eight. Nine ten eleven twelve.";
    let builder = ChunkBuilder::new(25, 0).unwrap();
    let chunks = builder.chunk_text(text);

    let rebuilt: Vec<&str> = chunks
        .iter()
        .flat_map(|c| c.text.split('\n'))
        .collect();
    assert_eq!(
        rebuilt,
        vec![
            "One two three four",
            "Five six seven eight",
            "Nine ten eleven twelve"
        ]
    );
}
