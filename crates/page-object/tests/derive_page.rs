//! `#[derive(Page)]` through the re-export.

use page_object::{MockDriver, Page, PageObject, UrlSegments};

#[derive(Debug, Page)]
#[page(url = "/posts/:postID/comments/:commentID", name = "comment")]
struct CommentPage;

#[derive(Debug, Default, Page)]
struct DashboardHome;

#[derive(Debug, Page)]
#[page(url = "/users/:id")]
struct ProfilePage<T: Send + Sync> {
    #[allow(dead_code)]
    marker: T,
}

#[test]
fn derive_reads_attributes() {
    assert_eq!(CommentPage.url(), "/posts/:postID/comments/:commentID");
    assert_eq!(CommentPage.page_name(), "comment");
    assert_eq!(CommentPage::PAGE_NAME, "comment");
}

#[test]
fn derive_defaults() {
    assert_eq!(DashboardHome.url(), "/");
    assert_eq!(DashboardHome::PAGE_NAME, "DashboardHome");
}

#[test]
fn derive_supports_generics() {
    let page = ProfilePage { marker: 1_u8 };
    assert_eq!(page.url(), "/users/:id");
    assert_eq!(page.page_name(), "ProfilePage");
}

#[derive(Debug)]
struct HandWrittenPage;

impl Page for HandWrittenPage {}

#[test]
fn derived_and_hand_written_defaults_agree() {
    assert_eq!(DashboardHome.page_name(), "DashboardHome");
    assert_eq!(HandWrittenPage.page_name(), "HandWrittenPage");
}

#[tokio::test]
async fn derived_page_drives_navigation() {
    let mut page = PageObject::builder(MockDriver::new())
        .page(CommentPage)
        .build();
    page.visit_segments(&UrlSegments::new().with("postID", 1).with("commentID", 2));
    page.run().await.unwrap();
    assert_eq!(page.driver().current_url, "/posts/1/comments/2");
}
