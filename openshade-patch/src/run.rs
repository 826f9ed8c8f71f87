use crate::ops;

/// A chain of patch operations over one shader buffer.
///
/// Each step either commits its patched text or marks the whole run as
/// failed; a failed step leaves the text exactly as the previous step
/// left it, and later steps keep running against that text. The final
/// `ok` flag ANDs every step together, so a caller sees failure even
/// when only one anchor of many was missing.
#[derive(Debug)]
pub struct PatchRun {
    text: String,
    ok: bool,
}

impl PatchRun {
    pub fn new(text: impl Into<String>) -> Self {
        PatchRun {
            text: text.into(),
            ok: true,
        }
    }

    /// Whether every step so far found its anchors.
    pub fn ok(&self) -> bool {
        self.ok
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    pub fn replace_all(&mut self, search: &str, replace: &str) -> &mut Self {
        let out = ops::replace_all(&self.text, search, replace);
        self.update(out)
    }

    pub fn replace_first(&mut self, search: &str, replace: &str) -> &mut Self {
        let out = ops::replace_first(&self.text, search, replace);
        self.update(out)
    }

    pub fn replace_second(&mut self, search: &str, replace: &str) -> &mut Self {
        let out = ops::replace_second(&self.text, search, replace);
        self.update(out)
    }

    pub fn add_after(&mut self, anchor: &str, insert: &str, skip: usize) -> &mut Self {
        let out = ops::add_after(&self.text, anchor, insert, skip);
        self.update(out)
    }

    pub fn add_before(&mut self, anchor: &str, insert: &str) -> &mut Self {
        let out = ops::add_before(&self.text, anchor, insert);
        self.update(out)
    }

    pub fn comment_out(&mut self, span: &str) -> &mut Self {
        let out = ops::comment_out(&self.text, span);
        self.update(out)
    }

    pub fn comment_out_range(&mut self, start: &str, end: &str, include_end: bool) -> &mut Self {
        let out = ops::comment_out_range(&self.text, start, end, include_end);
        self.update(out)
    }

    /// Marks the run as failed without touching the text. For callers
    /// whose own preprocessing of a patch value falls over.
    pub fn fail(&mut self) -> &mut Self {
        self.ok = false;
        self
    }

    fn update(&mut self, out: Option<String>) -> &mut Self {
        match out {
            Some(text) => self.text = text,
            None => self.ok = false,
        }
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn steps_thread_text_through_the_run() {
        let mut run = PatchRun::new("one two three");
        run.replace_all("one", "1").replace_all("three", "3");
        assert!(run.ok());
        assert_eq!(run.into_text(), "1 two 3");
    }

    #[test]
    fn one_missing_anchor_fails_the_whole_run() {
        let mut run = PatchRun::new("one two");
        run.replace_all("one", "1")
            .replace_all("absent", "x")
            .replace_all("two", "2");
        assert!(!run.ok());
        // The failed step is skipped, not the steps after it.
        assert_eq!(run.text(), "1 2");
    }
}
