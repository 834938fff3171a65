/// Build the content of a file both sides of a merge changed differently
///
/// ```text
/// <<<<<<< <current branch>
/// <current content>
/// =======
/// <target content>
/// >>>>>>> <target branch>
/// ```
///
/// A deleted side contributes nothing; a side without a trailing newline
/// gets one so the markers stay on their own lines.
pub fn conflict_content(
    current_branch: &str,
    target_branch: &str,
    current: Option<&[u8]>,
    target: Option<&[u8]>,
) -> Vec<u8> {
    let mut content = Vec::new();

    content.extend_from_slice(format!("<<<<<<< {current_branch}\n").as_bytes());
    push_terminated(&mut content, current);
    content.extend_from_slice(b"=======\n");
    push_terminated(&mut content, target);
    content.extend_from_slice(format!(">>>>>>> {target_branch}\n").as_bytes());

    content
}

fn push_terminated(content: &mut Vec<u8>, side: Option<&[u8]>) {
    if let Some(side) = side
        && !side.is_empty()
    {
        content.extend_from_slice(side);
        if !side.ends_with(b"\n") {
            content.push(b'\n');
        }
    }
}
