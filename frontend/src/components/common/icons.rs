//! 内联 SVG 图标
//!
//! 使用 `attr:class` 从调用方传入尺寸与颜色，例如 `<Package attr:class="h-5 w-5" />`。

use leptos::prelude::*;

fn svg_icon(paths: &'static [&'static str]) -> impl IntoView {
    view! {
        <svg
            xmlns="http://www.w3.org/2000/svg"
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
        >
            {paths.iter().map(|d| view! { <path d={*d} /> }).collect_view()}
        </svg>
    }
}

macro_rules! icon {
    ($name:ident, $($path:literal),+ $(,)?) => {
        #[component]
        pub fn $name() -> impl IntoView {
            let paths: &'static [&'static str] = &[$($path),+];
            svg_icon(paths)
        }
    };
}

icon!(Package, "M16.5 9.4 7.55 4.24", "M21 16V8a2 2 0 0 0-1-1.73l-7-4a2 2 0 0 0-2 0l-7 4A2 2 0 0 0 3 8v8a2 2 0 0 0 1 1.73l7 4a2 2 0 0 0 2 0l7-4A2 2 0 0 0 21 16z", "M3.29 7 12 12l8.71-5", "M12 22V12");
icon!(LayoutDashboard, "M3 3h7v9H3z", "M14 3h7v5h-7z", "M14 12h7v9h-7z", "M3 16h7v5H3z");
icon!(FileText, "M14.5 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2V7.5L14.5 2z", "M14 2v6h6", "M16 13H8", "M16 17H8", "M10 9H8");
icon!(AlertTriangle, "m21.73 18-8-14a2 2 0 0 0-3.48 0l-8 14A2 2 0 0 0 4 21h16a2 2 0 0 0 1.73-3", "M12 9v4", "M12 17h.01");
icon!(LogOut, "M9 21H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h4", "m16 17 5-5-5-5", "M21 12H9");
icon!(LogIn, "M15 3h4a2 2 0 0 1 2 2v14a2 2 0 0 1-2 2h-4", "m10 17 5-5-5-5", "M15 12H3");
icon!(Menu, "M4 12h16", "M4 6h16", "M4 18h16");
icon!(X, "M18 6 6 18", "m6 6 12 12");
icon!(Plus, "M5 12h14", "M12 5v14");
icon!(Search, "m21 21-4.3-4.3", "M11 3a8 8 0 1 0 0 16 8 8 0 0 0 0-16z");
icon!(Eye, "M2 12s3-7 10-7 10 7 10 7-3 7-10 7-10-7-10-7z", "M12 9a3 3 0 1 0 0 6 3 3 0 0 0 0-6z");
icon!(Trash, "M3 6h18", "M19 6v14c0 1-1 2-2 2H7c-1 0-2-1-2-2V6", "M8 6V4c0-1 1-2 2-2h4c1 0 2 1 2 2v2");
icon!(ChevronUp, "m18 15-6-6-6 6");
icon!(ChevronDown, "m6 9 6 6 6-6");
icon!(ArrowLeft, "m12 19-7-7 7-7", "M19 12H5");
icon!(History, "M3 12a9 9 0 1 0 9-9 9.75 9.75 0 0 0-6.74 2.74L3 8", "M3 3v5h5", "M12 7v5l4 2");
icon!(CheckCircle, "M22 11.08V12a10 10 0 1 1-5.93-9.14", "m9 11 3 3L22 4");
icon!(XCircle, "M12 2a10 10 0 1 0 0 20 10 10 0 0 0 0-20z", "m15 9-6 6", "m9 9 6 6");
