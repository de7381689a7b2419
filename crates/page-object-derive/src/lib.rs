//! Derive macro for page descriptions.
//!
//! Writing a `Page` impl by hand for every screen is repetitive; the derive
//! reads the URL template and page name from an attribute instead:
//!
//! ```ignore
//! use page_object::Page;
//!
//! #[derive(Page)]
//! #[page(url = "/posts/:postID/comments/:commentID", name = "comment")]
//! struct CommentPage;
//!
//! assert_eq!(CommentPage.url(), "/posts/:postID/comments/:commentID");
//! assert_eq!(CommentPage::PAGE_NAME, "comment");
//! ```
//!
//! # Attributes
//!
//! - `url = "..."` - URL template (defaults to `"/"`)
//! - `name = "..."` - page name (defaults to the bare type name, as a
//!   hand-written `Page` impl does)

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Attribute, DeriveInput, LitStr};

/// Derive `page_object::Page`.
///
/// Also adds `PAGE_URL` and `PAGE_NAME` associated constants so the values
/// are usable without an instance.
#[proc_macro_derive(Page, attributes(page))]
pub fn derive_page(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_page(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_page(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let attrs = PageAttributes::parse(&input.attrs)?;
    let url = attrs.url.unwrap_or_else(|| "/".to_string());
    let page_name = attrs.name.unwrap_or_else(|| name.to_string());
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::page_object::Page for #name #ty_generics #where_clause {
            fn url(&self) -> &str {
                #url
            }

            fn page_name(&self) -> &str {
                #page_name
            }
        }

        impl #impl_generics #name #ty_generics #where_clause {
            /// URL template of this page
            pub const PAGE_URL: &'static str = #url;

            /// Name of this page
            pub const PAGE_NAME: &'static str = #page_name;
        }
    })
}

#[derive(Debug, Default)]
struct PageAttributes {
    url: Option<String>,
    name: Option<String>,
}

impl PageAttributes {
    fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("page")) {
            attr.parse_nested_meta(|meta| {
                let value = meta.value()?.parse::<LitStr>()?.value();
                if meta.path.is_ident("url") {
                    parsed.url = Some(value);
                } else if meta.path.is_ident("name") {
                    parsed.name = Some(value);
                } else {
                    return Err(meta.error("expected `url` or `name`"));
                }
                Ok(())
            })?;
        }
        Ok(parsed)
    }
}
